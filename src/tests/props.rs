use proptest::prelude::*;

use crate::{
	block::MAX_BLOCKS,
	dice::{
		roller::{OsRand, Roller},
		Dice, MAX_COUNT, MAX_SIDES,
	},
	parse::{command, segments, unmatched, MAX_TERMS},
};

proptest! {
	#[test]
	fn plain_totals_in_range(count in 1..=MAX_COUNT, sides in 2..=MAX_SIDES) {
		let dice = Dice::new(count, sides);
		let rolled = OsRand.roll(&dice, true).unwrap();
		prop_assert_eq!(rolled.rolls.len(), count as usize);
		prop_assert!(rolled.total() >= i64::from(count));
		prop_assert!(rolled.total() <= i64::from(count) * i64::from(sides));
	}

	#[test]
	fn fudge_totals_in_range(count in 1..=MAX_COUNT) {
		let total = OsRand.roll(&Dice::fudge(count), true).unwrap().total();
		prop_assert!(total.abs() <= i64::from(count));
	}

	#[test]
	fn keep_retains_exactly(count in 1..=20u32, keep in -20..=20i32) {
		let keep = keep.clamp(-(count as i32), count as i32);
		let dice = Dice::builder().count(count).sides(6).keep(keep).build();
		let rolled = OsRand.roll(&dice, true).unwrap();
		let expected = if keep == 0 { count } else { keep.unsigned_abs() };
		prop_assert_eq!(rolled.kept().count(), expected as usize);
		prop_assert_eq!(rolled.rolls.len(), count as usize);
	}

	#[test]
	fn parsing_never_fails(text in "\\PC*") {
		let cmd = command(&text);
		prop_assert!((1..=MAX_BLOCKS).contains(&cmd.blocks.len()));
		for block in &cmd.blocks {
			prop_assert!((1..=MAX_TERMS + 1).contains(&block.terms.len()));
			for term in block.terms.iter().filter(|term| !term.dice.is_literal()) {
				prop_assert!((1..=MAX_COUNT).contains(&term.dice.count));
				prop_assert!((2..=MAX_SIDES).contains(&term.dice.sides));
			}
		}
	}

	#[test]
	fn dice_notation_parses_clamped(count in 0..1000u32, sides in 0..10_000u32) {
		let cmd = command(&format!("{count}d{sides}"));
		let dice = cmd.blocks[0].terms[0].dice;
		prop_assert_eq!(dice.count, count.clamp(1, MAX_COUNT));
		prop_assert_eq!(dice.sides, sides.clamp(1, MAX_SIDES));
	}

	#[test]
	fn spans_stay_on_char_boundaries(text in "\\PC*") {
		for range in unmatched(&text) {
			prop_assert!(text.get(range.clone()).is_some());
			prop_assert!(!text[range].trim().is_empty());
		}
		for seg in segments(&text) {
			prop_assert_eq!(&text[seg.span.clone()], seg.text.as_str());
		}
	}
}
