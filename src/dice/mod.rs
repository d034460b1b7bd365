//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For using them as part of a larger expression, see
//! [`Term`](crate::term::Term) and [`Block`](crate::block::Block).

pub mod modifier;
pub mod roller;

use std::{borrow::Cow, cmp, fmt};

use self::modifier::Condition;
pub use self::{modifier::Modifier, roller::Roller};

/// Maximum number of dice that can be rolled by a single set of dice
pub const MAX_COUNT: u32 = 100;

/// Maximum number of sides for a single die
pub const MAX_SIDES: u32 = 1000;

/// Maximum number of additional dice a single set of exploding dice may add before exploding stops
pub const MAX_EXPLOSIONS: usize = 1000;

/// A set of one or more rollable dice with a specific number of sides, along with the modifiers and diagnostics to
/// apply to any resulting rolls from them.
///
/// Dice with a single side are literal numbers: rolling them never draws any randomness and their total is always
/// [`Dice::count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Every part of the notation is already represented")]
pub struct Dice {
	/// Number of dice to roll (or the value of a literal number)
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,

	/// Whether the dice are fudge dice, with faces of -1, 0, and +1
	pub fudge: bool,

	/// Whether dice landing on their maximum face add another roll
	pub explode: bool,

	/// Number of dice to keep after rolling: positive keeps the highest, negative keeps the lowest, zero keeps all
	pub keep: i32,

	/// Threshold to count rolls against (purely informational, never changes the total)
	pub threshold: Option<Condition>,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self {
			count,
			sides,
			fudge: false,
			explode: false,
			keep: 0,
			threshold: None,
		}
	}

	/// Creates a literal number, represented as dice with a single side.
	#[must_use]
	#[inline]
	pub const fn literal(val: u32) -> Self {
		Self::new(val, 1)
	}

	/// Creates a set of fudge dice.
	#[must_use]
	pub const fn fudge(count: u32) -> Self {
		Self {
			fudge: true,
			..Self::new(count, 3)
		}
	}

	/// Creates a new dice builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Indicates whether the dice are actually a literal number (a single side).
	#[must_use]
	#[inline]
	pub const fn is_literal(&self) -> bool {
		self.sides == 1
	}

	/// Gets the minimum threshold (`>n`), if the dice have one.
	#[must_use]
	pub const fn min_threshold(&self) -> Option<u32> {
		match self.threshold {
			Some(Condition::Gt(val)) => Some(val),
			_ => None,
		}
	}

	/// Gets the maximum threshold (`<n`), if the dice have one.
	#[must_use]
	pub const fn max_threshold(&self) -> Option<u32> {
		match self.threshold {
			Some(Condition::Lt(val)) => Some(val),
			_ => None,
		}
	}

	/// Lists the modifiers to apply to rolls of these dice, in the order they need to be applied.
	#[must_use]
	pub fn modifiers(&self) -> Vec<Modifier> {
		let mut modifiers = Vec::new();
		if self.explode {
			modifiers.push(Modifier::Explode);
		}
		match self.keep.cmp(&0) {
			cmp::Ordering::Greater => modifiers.push(Modifier::KeepHigh(self.keep.unsigned_abs())),
			cmp::Ordering::Less => modifiers.push(Modifier::KeepLow(self.keep.unsigned_abs())),
			cmp::Ordering::Equal => {}
		}
		modifiers
	}

	/// Builds the short dice notation used when listing rolls, such as `2d6` or `4df`.
	///
	/// # Examples
	/// ```
	/// use dicebot::Dice;
	///
	/// assert_eq!(Dice::new(2, 6).notation(), "2d6");
	/// assert_eq!(Dice::fudge(4).notation(), "4df");
	/// ```
	#[must_use]
	pub fn notation(&self) -> String {
		if self.fudge {
			format!("{}df", self.count)
		} else {
			format!("{}d{}", self.count, self.sides)
		}
	}
}

impl Default for Dice {
	/// Creates the default dice (1d100).
	#[inline]
	fn default() -> Self {
		Self::new(1, 100)
	}
}

impl fmt::Display for Dice {
	/// Formats the dice in the same notation they're parsed from, e.g. `2d6!>4k1`. Literals are plain numbers.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_literal() {
			return write!(f, "{}", self.count);
		}

		write!(f, "{}", self.notation())?;
		if self.explode {
			write!(f, "!")?;
		}
		if let Some(cond) = self.threshold {
			write!(f, "{cond}")?;
		}
		if self.keep != 0 {
			write!(f, "k{}", self.keep)?;
		}
		Ok(())
	}
}

/// Single die produced from rolling [`Dice`] and optionally applying [`Modifier`]s
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled (already shifted for fudge dice)
	pub val: i32,

	/// Modifier that caused the addition of this die, if any
	pub added_by: Option<Modifier>,

	/// Modifier that caused the drop of this die, if any
	pub dropped_by: Option<Modifier>,
}

impl DieRoll {
	/// Creates a new die roll with the given value.
	#[must_use]
	pub const fn new(val: i32) -> Self {
		Self {
			val,
			added_by: None,
			dropped_by: None,
		}
	}

	/// Marks this die roll as added by a given modifier, setting [`Self::added_by`].
	pub fn add(&mut self, from: Modifier) {
		self.added_by = Some(from);
	}

	/// Marks this die roll as dropped by a given modifier, setting [`Self::dropped_by`].
	pub fn drop(&mut self, from: Modifier) {
		self.dropped_by = Some(from);
	}

	/// Indicates whether this die roll was part of the original set (not added by a modifier).
	#[must_use]
	#[inline]
	pub const fn is_original(&self) -> bool {
		self.added_by.is_none()
	}

	/// Indicates whether this die roll has been dropped by a modifier.
	#[must_use]
	#[inline]
	pub const fn is_dropped(&self) -> bool {
		self.dropped_by.is_some()
	}

	/// Indicates whether this die roll is being kept (has *not* been dropped by a modifier).
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		self.dropped_by.is_none()
	}
}

impl PartialOrd for DieRoll {
	fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for DieRoll {
	fn cmp(&self, other: &Self) -> cmp::Ordering {
		self.val.cmp(&other.val)
	}
}

impl fmt::Display for DieRoll {
	/// The format of a die roll is simply the plain numeric value of the roll.
	/// If the roll was dropped, it is appended with ` (d)`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.val, if self.is_dropped() { " (d)" } else { "" })
	}
}

/// Representation of the result from rolling [`Dice`].
///
/// A fresh one is produced every time dice are rolled; rolling the same dice again never touches a previous result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Rolled dice are frequently built by hand in tests")]
pub struct Rolled<'a> {
	/// Each individual die roll that was made, in the order it was made (explosions last)
	pub rolls: Vec<DieRoll>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the total of all kept roll values. For literal numbers, this is the number itself.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::{roller::{Roller, Val as ValRoller}, Dice};
	///
	/// let dice = Dice::new(4, 8);
	/// let rolled = ValRoller(3).roll(&dice, true)?;
	/// assert_eq!(rolled.total(), 12);
	///
	/// let literal = Dice::literal(42);
	/// assert_eq!(ValRoller(3).roll(&literal, true)?.total(), 42);
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn total(&self) -> i64 {
		if self.dice.is_literal() {
			return i64::from(self.dice.count);
		}

		self.kept().map(|roll| i64::from(roll.val)).sum()
	}

	/// Iterates over the rolls that haven't been dropped, in roll order.
	pub fn kept(&self) -> impl Iterator<Item = &DieRoll> {
		self.rolls.iter().filter(|roll| roll.is_kept())
	}

	/// Iterates over the rolls that were dropped, in roll order.
	pub fn removed(&self) -> impl Iterator<Item = &DieRoll> {
		self.rolls.iter().filter(|roll| roll.is_dropped())
	}

	/// Counts the kept rolls that pass the dice's threshold condition, if the dice have one.
	#[must_use]
	pub fn threshold_count(&self) -> Option<usize> {
		let cond = self.dice.threshold?;
		Some(self.kept().filter(|roll| cond.check(roll.val)).count())
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			dice: Cow::Owned(self.dice.into_owned()),
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = i32>) -> Rolled<'_> {
		Rolled {
			rolls: rolls.into_iter().map(DieRoll::new).collect(),
			dice: Cow::Borrowed(dice),
		}
	}
}

impl fmt::Display for Rolled<'_> {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice,
	/// e.g. `4d6k2[6, 2 (d), 5, 3 (d)]`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}[{}]",
			self.dice,
			self.rolls
				.iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", ")
		)
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The operating system's random source failed to provide entropy.
	#[error("random source failure: {0}")]
	Entropy(#[from] rand::Error),

	/// A roller backed by predetermined values ran out of them.
	///
	/// # Examples
	/// ```
	/// use dicebot::dice::{roller::{Iter as IterRoller, Roller}, Dice, Error};
	///
	/// let mut roller = IterRoller::new(vec![1, 2]);
	/// assert!(matches!(roller.roll(&Dice::new(3, 6), true), Err(Error::Exhausted)));
	/// ```
	#[error("roller ran out of values")]
	Exhausted,
}

/// Builds [`Dice`] with a fluent interface.
///
/// # Examples
/// ```
/// use dicebot::dice::{modifier::Condition, Dice};
///
/// let dice = Dice::builder().count(6).sides(8).explode().keep(4).over(5).build();
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 6,
/// 		sides: 8,
/// 		fudge: false,
/// 		explode: true,
/// 		keep: 4,
/// 		threshold: Some(Condition::Gt(5)),
/// 	},
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Dice);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u32) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the number of sides per die.
	#[must_use]
	pub const fn sides(mut self, sides: u32) -> Self {
		self.0.sides = sides;
		self
	}

	/// Turns the dice into fudge dice (three sides, faces -1 to +1).
	#[must_use]
	pub const fn fudge(mut self) -> Self {
		self.0.fudge = true;
		self.0.sides = 3;
		self
	}

	/// Makes the dice explode on their maximum face.
	#[must_use]
	pub const fn explode(mut self) -> Self {
		self.0.explode = true;
		self
	}

	/// Sets how many dice to keep (positive for highest, negative for lowest).
	#[must_use]
	pub const fn keep(mut self, keep: i32) -> Self {
		self.0.keep = keep;
		self
	}

	/// Counts rolls over a minimum threshold.
	#[must_use]
	pub const fn over(mut self, min: u32) -> Self {
		self.0.threshold = Some(Condition::Gt(min));
		self
	}

	/// Counts rolls under a maximum threshold.
	#[must_use]
	pub const fn under(mut self, max: u32) -> Self {
		self.0.threshold = Some(Condition::Lt(max));
		self
	}

	/// Finalizes the dice.
	#[must_use]
	pub const fn build(self) -> Dice {
		self.0
	}
}
