use crate::{
	dice::{
		roller::{Iter as IterRoller, Val as ValRoller},
		Error,
	},
	parse::command,
	term::Quality,
};

#[test]
fn running_totals_fold_left() {
	let cmd = command("2d6 + 3 * 2 - 1");
	let evaled = cmd.blocks[0].eval(&mut ValRoller(3)).unwrap();
	assert_eq!(evaled.running_totals(), vec![6, 9, 18, 17]);
	assert_eq!(evaled.total(), 17);
}

#[test]
fn leading_subtraction_negates() {
	let cmd = command("-2d6 + 3");
	let evaled = cmd.blocks[0].eval(&mut ValRoller(3)).unwrap();
	assert_eq!(evaled.running_totals(), vec![-6, -3]);
}

#[test]
fn leading_operator_otherwise_ignored() {
	let cmd = command("*5 + 1d4");
	let evaled = cmd.blocks[0].eval(&mut ValRoller(2)).unwrap();
	assert_eq!(evaled.running_totals(), vec![5, 7]);
}

#[test]
fn max_and_min() {
	let cmd = command("1d20 ^ 15");
	assert_eq!(cmd.blocks[0].eval(&mut ValRoller(4)).unwrap().total(), 15);

	let cmd = command("1d20 v 15");
	assert_eq!(cmd.blocks[0].eval(&mut ValRoller(4)).unwrap().total(), 4);
}

#[test]
fn division_by_zero_keeps_total() {
	let cmd = command("1d20 / 0");
	assert_eq!(cmd.blocks[0].eval(&mut ValRoller(10)).unwrap().total(), 10);
}

#[test]
fn numbers_only_fold_against_d100() {
	let cmd = command("50");
	let evaled = cmd.blocks[0].eval(&mut ValRoller(30)).unwrap();
	assert_eq!(evaled.total(), 20);
}

#[test]
fn quality_from_last_rolled_term() {
	let cmd = command("1d6 + 1d20 + 3");
	let evaled = cmd.blocks[0].eval(&mut IterRoller::new(vec![6, 1])).unwrap();
	assert_eq!(evaled.terms[0].quality(), Some(Quality::Favorable));
	assert_eq!(evaled.quality(), Some(Quality::Unfavorable));
}

#[test]
fn blocks_evaluate_independently() {
	let cmd = command("1d6, 1d6; 1d6");
	let evaled = cmd.eval(&mut IterRoller::new(vec![1, 2, 3])).unwrap();
	assert_eq!(evaled.iter().map(|block| block.total()).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn roller_failure_fails_the_command() {
	let cmd = command("1d6, 2d6");
	let result = cmd.eval(&mut IterRoller::new(vec![1, 2]));
	assert!(matches!(result, Err(Error::Exhausted)));
}
