use super::*;
use crate::outcome::ParseOutcome;
use rstest::{fixture, rstest};

#[fixture]
fn parser() -> SchedulingIntervalParser {
    SchedulingIntervalParser::new()
}

fn range(from: u32, till: u32) -> ScheduleFilter {
    ScheduleFilter {
        from: Some(from),
        till: Some(till),
        step: None,
    }
}

#[rstest]
#[case("h23")]
#[case("h0")]
#[case("md31")]
#[case("md1")]
#[case("wd1-7")]
#[case("h/1")]
#[case("m0/30")]
#[case("h0/12")]
#[case("wd1-5h9-18m0/30")]
#[case("wd6-7h10-16")]
#[case("h9,12,15-17/2")]
#[case("md1-31/30wd/6h/23m/59s/59")]
#[case("s0-59/59")]
fn accepts_schedules(parser: SchedulingIntervalParser, #[case] input: &str) {
    let result = parser.parse_all(input);
    assert!(result.is_ok(), "{input}: {result:?}");
}

#[rstest]
#[case("h24", 1, ParseErrorKind::OutOfRange { field: "h", value: 24, min: 0, max: 23 })]
#[case("md32", 2, ParseErrorKind::OutOfRange { field: "md", value: 32, min: 1, max: 31 })]
#[case("md0", 2, ParseErrorKind::OutOfRange { field: "md", value: 0, min: 1, max: 31 })]
#[case("wd0", 2, ParseErrorKind::OutOfRange { field: "wd", value: 0, min: 1, max: 7 })]
#[case("wd8", 2, ParseErrorKind::OutOfRange { field: "wd", value: 8, min: 1, max: 7 })]
#[case("wd12", 3, ParseErrorKind::UnexpectedCharacter)]
#[case("h123", 3, ParseErrorKind::UnexpectedCharacter)]
#[case("m60", 1, ParseErrorKind::OutOfRange { field: "m", value: 60, min: 0, max: 59 })]
#[case("h5/1", 2, ParseErrorKind::UnexpectedCharacter)]
#[case("md1/1", 3, ParseErrorKind::UnexpectedCharacter)]
#[case("md1/15", 3, ParseErrorKind::UnexpectedCharacter)]
#[case("wd1/1", 3, ParseErrorKind::UnexpectedCharacter)]
#[case("h5-5/1", 5, ParseErrorKind::UnexpectedCharacter)]
#[case("h0-0/0", 5, ParseErrorKind::UnexpectedCharacter)]
#[case("md1-1/1", 6, ParseErrorKind::UnexpectedCharacter)]
#[case("h5-3", 3, ParseErrorKind::InvertedRange)]
#[case("h1-5/5", 5, ParseErrorKind::OutOfRange { field: "step", value: 5, min: 1, max: 4 })]
#[case("h/0", 2, ParseErrorKind::OutOfRange { field: "step", value: 0, min: 1, max: 23 })]
#[case("h/24", 2, ParseErrorKind::OutOfRange { field: "step", value: 24, min: 1, max: 23 })]
#[case("h9md1", 2, ParseErrorKind::MisorderedField { field: "md" })]
#[case("h1h2", 2, ParseErrorKind::MisorderedField { field: "h" })]
#[case("m1h2", 2, ParseErrorKind::MisorderedField { field: "h" })]
#[case("h", 1, ParseErrorKind::UnexpectedEnd)]
#[case("h1,", 3, ParseErrorKind::UnexpectedEnd)]
#[case("h1-", 3, ParseErrorKind::UnexpectedEnd)]
#[case("", 0, ParseErrorKind::UnexpectedEnd)]
#[case("x1", 0, ParseErrorKind::UnexpectedCharacter)]
fn rejects_schedules(
    parser: SchedulingIntervalParser,
    #[case] input: &str,
    #[case] position: usize,
    #[case] kind: ParseErrorKind,
) {
    let Err(err) = parser.parse_all(input) else {
        panic!("expected {input:?} to be rejected");
    };
    assert_eq!((err.position, err.kind), (position, kind), "{input}");
}

#[rstest]
fn decodes_field_groups(parser: SchedulingIntervalParser) {
    #[expect(clippy::expect_used, reason = "test asserts valid input")]
    let interval = parser.parse_all("md1-5h9-18").expect("schedule").value;
    assert_eq!(interval.fields.len(), 2);
    assert_eq!(interval.filters(ScheduleUnit::MonthDay), [range(1, 5)]);
    assert_eq!(interval.filters(ScheduleUnit::Hour), [range(9, 18)]);
    assert!(interval.filters(ScheduleUnit::WeekDay).is_empty());
}

#[rstest]
fn keeps_absent_parts_distinct_from_zero(parser: SchedulingIntervalParser) {
    #[expect(clippy::expect_used, reason = "test asserts valid input")]
    let interval = parser.parse_all("h/2m0").expect("schedule").value;
    assert_eq!(
        interval.filters(ScheduleUnit::Hour),
        [ScheduleFilter {
            from: None,
            till: None,
            step: Some(2)
        }]
    );
    assert_eq!(
        interval.filters(ScheduleUnit::Minute),
        [ScheduleFilter {
            from: Some(0),
            till: None,
            step: None
        }]
    );
}

#[rstest]
#[case("md1-5h9-18")]
#[case("wd1-5h9-18m0/30")]
#[case("h/1")]
#[case("md1,15wd1-7/2h0,6,12,18m0-59/15s30")]
fn round_trips_through_display(parser: SchedulingIntervalParser, #[case] input: &str) {
    #[expect(clippy::expect_used, reason = "test asserts valid input")]
    let interval = parser.parse_all(input).expect("schedule").value;
    assert_eq!(interval.to_string(), input);
}

#[rstest]
fn stops_at_entry_separator(parser: SchedulingIntervalParser) {
    assert_eq!(
        parser.outcome("wd1-5h9-18;wd6", 0),
        ParseOutcome::Continuation(10)
    );
}
