//! Dice modifiers and their related types.

use std::fmt;

use super::{roller::Roller, Error, Rolled, MAX_EXPLOSIONS};

/// Routines that can be applied to [`Dice`](super::Dice) to automatically manipulate resulting [`Rolled`] dice sets
/// from them as part of their rolling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Modifier {
	/// Explodes (keeps original and adds an additional newly-rolled die) dice that land on their maximum face,
	/// recursively for the additional dice as well.
	///
	/// The check is made against the value after any fudge shift, so fudge dice (which top out at +1 on three sides)
	/// never explode.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::{modifier::Modifier, roller::{Iter as IterRoller, Roller}, Dice, Rolled};
	///
	/// // Build the 4d6! dice set and create a roller that has predetermined values for the dice rolls
	/// let dice = Dice::builder().count(4).sides(6).explode().build();
	/// let premade_rolls = [3, 6, 1, 2, 6, 4];
	/// let mut rng = IterRoller::new(premade_rolls);
	///
	/// // Only the first four values are used for the initial roll. The 6 explodes into another 6, which explodes into
	/// // a 4.
	/// let mut rolled = rng.roll(&dice, false)?;
	/// Modifier::Explode.apply(&mut rolled, &mut rng)?;
	///
	/// let mut expected = Rolled::from_dice_and_rolls(&dice, premade_rolls);
	/// expected.rolls[4].add(Modifier::Explode);
	/// expected.rolls[5].add(Modifier::Explode);
	/// assert_eq!(rolled, expected);
	/// assert_eq!(rolled.total(), 22);
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	Explode,

	/// Keeps only the highest x dice, dropping the rest.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::{modifier::Modifier, roller::{Iter as IterRoller, Roller}, Dice, Rolled};
	///
	/// let dice = Dice::builder().count(4).sides(6).keep(2).build();
	/// let premade_rolls = [3, 6, 1, 2];
	/// let mut rng = IterRoller::new(premade_rolls);
	/// let rolled = rng.roll(&dice, true)?;
	///
	/// let mut expected = Rolled::from_dice_and_rolls(&dice, premade_rolls);
	/// expected.rolls[2].drop(Modifier::KeepHigh(2));
	/// expected.rolls[3].drop(Modifier::KeepHigh(2));
	/// assert_eq!(rolled, expected);
	/// assert_eq!(rolled.total(), 9);
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	KeepHigh(u32),

	/// Keeps only the lowest x dice, dropping the rest.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::{modifier::Modifier, roller::{Iter as IterRoller, Roller}, Dice, Rolled};
	///
	/// let dice = Dice::builder().count(4).sides(6).keep(-2).build();
	/// let premade_rolls = [3, 6, 1, 2];
	/// let mut rng = IterRoller::new(premade_rolls);
	/// let rolled = rng.roll(&dice, true)?;
	///
	/// let mut expected = Rolled::from_dice_and_rolls(&dice, premade_rolls);
	/// expected.rolls[0].drop(Modifier::KeepLow(2));
	/// expected.rolls[1].drop(Modifier::KeepLow(2));
	/// assert_eq!(rolled, expected);
	/// assert_eq!(rolled.total(), 3);
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	KeepLow(u32),
}

impl Modifier {
	/// Applies the modifier to a set of rolls, using a given roller if additional die rolls are needed.
	///
	/// # Errors
	/// If the roller fails to produce an additional roll, its error is returned.
	pub fn apply(self, rolled: &mut Rolled, rng: &mut impl Roller) -> Result<(), Error> {
		match self {
			Self::Explode => self.apply_explode(rolled, rng)?,
			Self::KeepHigh(count) => self.apply_keep_high(rolled, count),
			Self::KeepLow(count) => self.apply_keep_low(rolled, count),
		}

		Ok(())
	}

	/// Applies the [`Self::Explode`] variant to a set of rolled dice.
	fn apply_explode(self, rolled: &mut Rolled, rng: &mut impl Roller) -> Result<(), Error> {
		let max_face = i64::from(rolled.dice.sides);
		let explodes = |val: i32| i64::from(val) == max_face;

		// Determine how many initial rolls qualify for explosion
		let mut to_explode = rolled
			.rolls
			.iter()
			.filter(|roll| roll.is_kept() && explodes(roll.val))
			.count();
		let mut added = 0;

		while to_explode > 0 {
			if added >= MAX_EXPLOSIONS {
				log::warn!(
					"{} stopped exploding after {} additional rolls",
					rolled.dice,
					MAX_EXPLOSIONS
				);
				break;
			}

			// Roll additional dice, never past the explosion cap
			let wave = to_explode.min(MAX_EXPLOSIONS - added);
			let mut explosions = Vec::with_capacity(wave);
			for _ in 0..wave {
				let mut roll = rng.roll_die(&rolled.dice)?;
				roll.add(self);
				explosions.push(roll);
			}
			added += wave;

			// Determine how many additional rolls qualify for explosion
			to_explode = explosions.iter().filter(|roll| explodes(roll.val)).count();
			rolled.rolls.append(&mut explosions);
		}

		Ok(())
	}

	/// Applies the [`Self::KeepHigh`] variant to a set of rolled dice.
	fn apply_keep_high(self, rolled: &mut Rolled, count: u32) {
		let mut refs = rolled
			.rolls
			.iter_mut()
			.filter(|roll| roll.is_kept())
			.collect::<Vec<_>>();
		refs.sort();
		refs.reverse();
		refs.iter_mut().skip(count as usize).for_each(|roll| roll.drop(self));
	}

	/// Applies the [`Self::KeepLow`] variant to a set of rolled dice.
	fn apply_keep_low(self, rolled: &mut Rolled, count: u32) {
		let mut refs = rolled
			.rolls
			.iter_mut()
			.filter(|roll| roll.is_kept())
			.collect::<Vec<_>>();
		refs.sort();
		refs.iter_mut().skip(count as usize).for_each(|roll| roll.drop(self));
	}
}

impl fmt::Display for Modifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Explode => write!(f, "!"),
			Self::KeepHigh(count) => write!(f, "k{count}"),
			Self::KeepLow(count) => write!(f, "k-{count}"),
		}
	}
}

/// Test that die values can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Only the two threshold directions exist in the notation")]
pub enum Condition {
	/// Checks whether values are greater than its own value. Symbol: `>`
	Gt(u32),

	/// Checks whether values are less than its own value. Symbol: `<`
	Lt(u32),
}

impl Condition {
	/// Checks a value against the condition.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::modifier::Condition;
	///
	/// assert!(Condition::Gt(4).check(5));
	/// assert!(!Condition::Gt(4).check(4));
	/// assert!(Condition::Lt(2).check(-1));
	/// ```
	#[must_use]
	pub fn check(&self, val: i32) -> bool {
		match self {
			Self::Gt(expected) => i64::from(val) > i64::from(*expected),
			Self::Lt(expected) => i64::from(val) < i64::from(*expected),
		}
	}

	/// Gets the symbol that represents the condition.
	#[must_use]
	pub const fn symbol(&self) -> &'static str {
		match self {
			Self::Gt(..) => ">",
			Self::Lt(..) => "<",
		}
	}
}

impl fmt::Display for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}{}",
			self.symbol(),
			match self {
				Self::Gt(expected) | Self::Lt(expected) => expected,
			}
		)
	}
}
