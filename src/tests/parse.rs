use crate::{
	dice::{modifier::Condition, Dice},
	parse::{command, segments, terms, unmatched},
	term::{Operator, Term},
};

#[test]
fn single_dice() {
	assert_terms("2d6", &[(Operator::Add, Dice::new(2, 6))]);
}

#[test]
fn empty_rolls_default() {
	assert_terms("", &[(Operator::Add, Dice::default())]);
	assert_terms("blah", &[(Operator::Add, Dice::default())]);
}

#[test]
fn bare_d_needs_sides() {
	assert_terms("d", &[(Operator::Add, Dice::new(1, 100))]);
}

#[test]
fn zero_count_and_sides_clamp_up() {
	assert_terms("0d0", &[(Operator::Add, Dice::new(1, 1))]);
	assert_terms("0d1", &[(Operator::Add, Dice::new(1, 1))]);
}

#[test]
fn huge_count_and_sides_clamp_down() {
	assert_terms("999d9999", &[(Operator::Add, Dice::new(100, 1000))]);
}

#[test]
fn percentile_dice() {
	assert_terms("d%", &[(Operator::Add, Dice::new(1, 100))]);
	assert_terms("2d%", &[(Operator::Add, Dice::new(2, 100))]);
}

#[test]
fn missing_count_is_one() {
	assert_terms("d20", &[(Operator::Add, Dice::new(1, 20))]);
}

#[test]
fn exploding() {
	assert_terms("1d6!", &[(Operator::Add, Dice::builder().count(1).sides(6).explode().build())]);
}

#[test]
fn fudge_dice() {
	assert_terms("4f", &[(Operator::Add, Dice::fudge(4))]);
	assert_terms("4df", &[(Operator::Add, Dice::fudge(4))]);
	assert_terms("4dF", &[(Operator::Add, Dice::fudge(4))]);
}

#[test]
fn fudge_literal_count_clamps() {
	assert_terms("500f", &[(Operator::Add, Dice::fudge(100))]);
	assert_terms("0f", &[(Operator::Add, Dice::fudge(1))]);
}

#[test]
fn unicode_multiplication() {
	assert_terms(
		"2d6×5",
		&[(Operator::Add, Dice::new(2, 6)), (Operator::Mul, Dice::literal(5))],
	);
}

#[test]
fn numbers_only_subtract_d100() {
	assert_terms(
		"Skill=50",
		&[(Operator::Add, Dice::literal(50)), (Operator::Sub, Dice::default())],
	);
}

#[test]
fn dice_then_number() {
	assert_terms(
		"1d20-1",
		&[(Operator::Add, Dice::new(1, 20)), (Operator::Sub, Dice::literal(1))],
	);
	assert_terms(
		"2d20+12345",
		&[(Operator::Add, Dice::new(2, 20)), (Operator::Add, Dice::literal(12345))],
	);
}

#[test]
fn spaces_around_operators() {
	assert_terms(
		"2d6 + 1",
		&[(Operator::Add, Dice::new(2, 6)), (Operator::Add, Dice::literal(1))],
	);
	assert_terms(
		"3d3 - 5",
		&[(Operator::Add, Dice::new(3, 3)), (Operator::Sub, Dice::literal(5))],
	);
}

#[test]
fn missing_operator_adds() {
	assert_terms(
		"2d2+1 1d6",
		&[
			(Operator::Add, Dice::new(2, 2)),
			(Operator::Add, Dice::literal(1)),
			(Operator::Add, Dice::new(1, 6)),
		],
	);
}

#[test]
fn separators_are_skipped_within_terms() {
	assert_terms(
		"1d20, 2d6-10",
		&[
			(Operator::Add, Dice::new(1, 20)),
			(Operator::Add, Dice::new(2, 6)),
			(Operator::Sub, Dice::literal(10)),
		],
	);
}

#[test]
fn term_limit() {
	assert_terms(
		"1d1+1 2d2-2 3d3+3",
		&[
			(Operator::Add, Dice::new(1, 1)),
			(Operator::Add, Dice::literal(1)),
			(Operator::Add, Dice::new(2, 2)),
			(Operator::Sub, Dice::literal(2)),
			(Operator::Add, Dice::new(3, 3)),
		],
	);
}

#[test]
fn thresholds() {
	assert_eq!(terms("2d6>5")[0].dice.threshold, Some(Condition::Gt(5)));
	assert_eq!(terms("2d6<2")[0].dice.threshold, Some(Condition::Lt(2)));
	assert_eq!(terms("2d6>6")[0].dice.threshold, Some(Condition::Gt(5)));
	assert_eq!(terms("2d6<1")[0].dice.threshold, Some(Condition::Lt(2)));
	assert_eq!(terms("4df>3")[0].dice.threshold, Some(Condition::Gt(2)));
}

#[test]
fn zero_minimum_is_no_threshold() {
	assert_eq!(terms("2d6>0")[0].dice.threshold, None);
	assert_eq!(terms("1d1>5")[0].dice.threshold, None);
	assert_eq!(terms("2d6<0")[0].dice.threshold, Some(Condition::Lt(2)));
}

#[test]
fn keep_clamps_to_count() {
	assert_eq!(terms("6d6k5")[0].dice.keep, 5);
	assert_eq!(terms("2d6k5")[0].dice.keep, 2);
	assert_eq!(terms("6d6k-4")[0].dice.keep, -4);
	assert_eq!(terms("2d6k-5")[0].dice.keep, -2);
}

#[test]
fn full_dice_shape() {
	let expected = Dice::builder().count(10).sides(6).explode().over(4).keep(-3).build();
	assert_terms("10d6!>4k-3", &[(Operator::Add, expected)]);
	assert_eq!(expected.to_string(), "10d6!>4k-3");
}

#[test]
fn every_operator() {
	assert_terms(
		"1d20 / 2 ^ 3 v 9 * 2",
		&[
			(Operator::Add, Dice::new(1, 20)),
			(Operator::Div, Dice::literal(2)),
			(Operator::Max, Dice::literal(3)),
			(Operator::Min, Dice::literal(9)),
			(Operator::Mul, Dice::literal(2)),
		],
	);
}

#[test]
fn case_insensitive() {
	assert_terms("2D6", &[(Operator::Add, Dice::new(2, 6))]);
	assert_terms("4DF", &[(Operator::Add, Dice::fudge(4))]);
	assert_eq!(terms("1d6 FOR luck")[0].label.as_deref(), Some("luck"));
	assert!(command("MINI 1d6").blocks[0].mini);
}

#[test]
fn labels() {
	let parsed = terms("1d20>15 for attack");
	assert_eq!(parsed.len(), 1);
	assert_eq!(parsed[0].label.as_deref(), Some("attack"));
	assert_eq!(parsed[0].dice.threshold, Some(Condition::Gt(15)));

	assert_eq!(terms("1d20 for attack  ")[0].label.as_deref(), Some("attack"));
}

#[test]
fn blank_label_is_no_label() {
	let parsed = terms("1d6 for   ");
	assert_eq!(parsed.len(), 1);
	assert_eq!(parsed[0].label, None);
}

#[test]
fn label_runs_to_end_of_block() {
	let parsed = terms("1d6 for fire + 2");
	assert_eq!(parsed.len(), 1);
	assert_eq!(parsed[0].label.as_deref(), Some("fire + 2"));

	let parsed = terms("1d6 + 2 for fire");
	assert_eq!(parsed.len(), 2);
	assert_eq!(parsed[0].label, None);
	assert_eq!(parsed[1].label.as_deref(), Some("fire"));
}

#[test]
fn segments_split_and_mark() {
	let found = segments("2d6, m 1d4;mini 3d8 for bonus");
	assert_eq!(
		found.iter().map(|seg| (seg.mini, seg.text.as_str())).collect::<Vec<_>>(),
		vec![(false, "2d6"), (true, "1d4"), (true, "3d8 for bonus")]
	);
}

#[test]
fn segment_spans_point_at_text() {
	let text = "1d4 ; mini 2d6,3";
	for seg in segments(text) {
		assert_eq!(&text[seg.span.clone()], seg.text);
	}
}

#[test]
fn marker_needs_a_space() {
	let cmd = command("m1d6");
	assert!(!cmd.blocks[0].mini);
	assert_eq!(cmd.blocks[0].terms, vec![Term::new(Operator::Add, Dice::new(1, 6))]);
}

#[test]
fn block_limit() {
	let cmd = command("1d4,1d6,1d8,1d10,1d12,1d20,1d100");
	assert_eq!(cmd.blocks.len(), 5);
	assert_eq!(cmd.blocks[4].terms[0].dice, Dice::new(1, 12));
}

#[test]
fn separators_only_default() {
	for text in ["", ";;,", ";;,  "] {
		let cmd = command(text);
		assert_eq!(cmd.blocks.len(), 1);
		assert!(!cmd.blocks[0].mini);
		assert_eq!(cmd.blocks[0].terms, vec![Term::new(Operator::Add, Dice::default())]);
	}
}

#[test]
fn commands_are_deterministic() {
	let text = "2d6+3, mini 1d20>15 for attack; 4df";
	assert_eq!(command(text), command(text));
	assert_eq!(command(text).to_string(), "+2d6 +3, mini +1d20>15 for attack, +4df");
}

#[test]
fn unmatched_words() {
	let text = "2d6 plus 3";
	assert_eq!(slices(text, &unmatched(text)), vec!["plus"]);
	assert!(unmatched("2d6 + 3, 1d4").is_empty());
}

#[test]
fn unmatched_excess_blocks() {
	let text = "1,2,3,4,5,6";
	assert_eq!(slices(text, &unmatched(text)), vec!["6"]);
}

#[test]
fn unmatched_excess_terms() {
	let text = "1 2 3 4 5 6";
	assert_eq!(slices(text, &unmatched(text)), vec!["6"]);
}

#[test]
fn unmatched_in_later_segments() {
	let text = "1d20, 2d6 ok";
	assert_eq!(slices(text, &unmatched(text)), vec!["ok"]);
}

fn assert_terms(text: &str, expected: &[(Operator, Dice)]) {
	let expected = expected
		.iter()
		.map(|&(op, dice)| Term::new(op, dice))
		.collect::<Vec<_>>();
	assert_eq!(terms(text), expected, "parsing {text:?}");
}

fn slices<'a>(text: &'a str, ranges: &[std::ops::Range<usize>]) -> Vec<&'a str> {
	ranges.iter().map(|range| &text[range.clone()]).collect()
}
