use crate::{
	dice::roller::{Iter as IterRoller, Val as ValRoller},
	parse::command,
	report::{BlockReport, Field},
	term::Quality,
};

#[test]
fn single_term_has_no_equals() {
	let report = report_for("1d20 for initiative", &mut ValRoller(17));
	assert_eq!(report.summary, "*17* for *initiative*");
	assert_eq!(report.fallback, "17 for initiative");
	assert_eq!(report.total, 17);
}

#[test]
fn multiple_terms_show_final_total() {
	let report = report_for("2d6 × 2 - 1", &mut ValRoller(4));
	assert_eq!(report.summary, "*8* × *2* - *1* = *15*");
	assert_eq!(report.fallback, "8 * 2 - 1 = 15");
}

#[test]
fn leading_subtraction_in_summary() {
	let report = report_for("-1d6 + 10", &mut ValRoller(4));
	assert_eq!(report.summary, "*-4* + *10* = *6*");
}

#[test]
fn mini_hides_diagnostics() {
	let report = report_for("mini 2d6>4 for fire", &mut ValRoller(5));
	assert!(report.compact);
	assert!(report.diagnostics.is_empty());
	assert_eq!(report.total, 10);
	assert_eq!(report.summary, "*10* for *fire*");
	assert_eq!(report.quality, Some(Quality::Favorable));
}

#[test]
fn literals_have_no_diagnostics() {
	let report = report_for("Skill=50", &mut ValRoller(20));
	assert_eq!(report.diagnostics.len(), 1);
	assert_eq!(report.diagnostics[0].dice, "1d100");
	assert_eq!(report.fallback, "50 - 20 = 30");
}

#[test]
fn rolls_keep_their_order_without_keep() {
	let report = report_for("5d10>7", &mut IterRoller::new(vec![8, 9, 7, 1, 10]));
	assert_eq!(
		report.diagnostics[0].fields(),
		vec![
			Field::new("Dice", "5d10"),
			Field::new("Rolls", "8 9 7 1 10"),
			Field::new("Minimum", "7"),
			Field::new("Over", "3"),
		]
	);
}

#[test]
fn zero_minimum_has_no_fields() {
	let report = report_for("2d6>0", &mut ValRoller(3));
	assert_eq!(
		report.diagnostics[0].fields(),
		vec![Field::new("Dice", "2d6"), Field::new("Rolls", "3 3")]
	);
	assert_eq!(report.diagnostics[0].over, None);
}

#[test]
fn blank_label_is_left_out() {
	let report = report_for("1d6 for   ", &mut ValRoller(2));
	assert_eq!(report.summary, "*2*");
	assert_eq!(report.fallback, "2");
}

#[test]
fn maximum_fields() {
	let report = report_for("3d6<3", &mut IterRoller::new(vec![1, 2, 6]));
	let fields = report.diagnostics[0].fields();
	assert_eq!(fields[2], Field::new("Maximum", "3"));
	assert_eq!(fields[3], Field::new("Under", "2"));
}

#[test]
fn keep_sorts_rolls_and_lists_removed() {
	let report = report_for("2d6!k1", &mut IterRoller::new(vec![6, 2, 3]));
	assert_eq!(report.total, 6);
	assert_eq!(
		report.diagnostics[0].fields(),
		vec![
			Field::new("Dice", "2d6"),
			Field::new("Rolls", "6"),
			Field::new("Keep", "1"),
			Field::new("Removed", "2 3"),
		]
	);

	let report = report_for("4d6k-2", &mut IterRoller::new(vec![5, 1, 6, 2]));
	let fields = report.diagnostics[0].fields();
	assert_eq!(fields[1], Field::new("Rolls", "1 2"));
	assert_eq!(fields[2], Field::new("Keep", "-2"));
	assert_eq!(fields[3], Field::new("Removed", "5 6"));
}

#[test]
fn fudge_notation() {
	let report = report_for("4df", &mut IterRoller::new(vec![3, 1, 2, 2]));
	assert_eq!(report.diagnostics[0].dice, "4df");
	assert_eq!(report.diagnostics[0].rolls, vec![1, -1, 0, 0]);
	assert_eq!(report.quality, Some(Quality::Neutral));
}

#[test]
fn diagnostics_for_each_rolled_term() {
	let report = report_for("1d4 + 2 + 1d8", &mut ValRoller(3));
	assert_eq!(
		report.diagnostics.iter().map(|diag| diag.dice.as_str()).collect::<Vec<_>>(),
		vec!["1d4", "1d8"]
	);
}

fn report_for(text: &str, rng: &mut impl crate::dice::Roller) -> BlockReport {
	let cmd = command(text);
	let evaled = cmd.blocks[0].eval(rng).unwrap();
	BlockReport::new(&evaled)
}
