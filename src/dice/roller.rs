//! Abstractions for rolling [`DieRoll`]s using various means.

use std::{borrow::Cow, iter::Peekable};

#[cfg(feature = "fastrand")]
use fastrand::Rng;
use rand::{rngs::OsRng, RngCore};

use super::{Dice, DieRoll, Error, Rolled};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die face in `1..=sides`.
	///
	/// # Errors
	/// If the underlying source of values fails, an error variant is returned.
	fn roll_face(&mut self, sides: u32) -> Result<i32, Error>;

	/// Rolls a single die of a set of dice, shifting the face down by 2 for fudge dice.
	///
	/// # Errors
	/// If the underlying source of values fails, an error variant is returned.
	fn roll_die(&mut self, dice: &Dice) -> Result<DieRoll, Error> {
		let face = self.roll_face(dice.sides)?;
		let val = if dice.fudge { face - 2 } else { face };
		log::trace!("rolled {val} on a d{}", dice.sides);
		Ok(DieRoll::new(val))
	}

	/// Rolls a set of dice and optionally applies all of its modifiers to the rolls.
	/// Literal numbers (dice with a single side) never roll anything.
	///
	/// # Errors
	/// If the roller fails to produce any of the rolls, an error variant is returned.
	fn roll<'d, 'r>(&mut self, dice: &'d Dice, apply_mods: bool) -> Result<Rolled<'r>, Error>
	where
		'd: 'r,
		Self: Sized,
	{
		if dice.is_literal() {
			return Ok(Rolled {
				rolls: Vec::new(),
				dice: Cow::Borrowed(dice),
			});
		}

		// Roll the dice!
		let mut rolls = Vec::with_capacity(dice.count as usize);
		for _ in 0..dice.count {
			rolls.push(self.roll_die(dice)?);
		}

		let mut rolled = Rolled {
			rolls,
			dice: Cow::Borrowed(dice),
		};

		// Apply all of the dice's modifiers
		if apply_mods {
			for modifier in dice.modifiers() {
				modifier.apply(&mut rolled, self)?;
			}
		}

		Ok(rolled)
	}
}

/// Generates rolls from the operating system's cryptographically secure random source. This is the roller to use for
/// anything players see.
///
/// Values are drawn with rejection sampling, so every face is exactly as likely as any other.
///
/// # Examples
/// ```
/// use dicebot::dice::{roller::{OsRand, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let rolled = OsRand.roll(&dice, true)?;
/// assert!(rolled.rolls.iter().all(|roll| (1..=6).contains(&roll.val)));
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[expect(clippy::exhaustive_structs, reason = "Stateless unit roller")]
pub struct OsRand;

impl Roller for OsRand {
	fn roll_face(&mut self, sides: u32) -> Result<i32, Error> {
		if sides == 0 {
			return Ok(0);
		}

		// Largest multiple of `sides` that fits, so that every face owns the same number of raw values
		let zone = (u32::MAX / sides) * sides;
		loop {
			let mut buf = [0; 4];
			OsRng.try_fill_bytes(&mut buf)?;
			let raw = u32::from_le_bytes(buf);
			if raw < zone {
				return Ok(face_from(raw % sides + 1));
			}
		}
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// This isn't suitable for rolls players rely on, but a seeded instance is handy for reproducible simulations.
///
/// # Examples
/// ```
/// use dicebot::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice, true)?;
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice, true)?;
/// assert_eq!(first, second);
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die face using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_face(&mut self, sides: u32) -> Result<i32, Error> {
		if sides > 0 {
			Ok(face_from(self.0.u32(1..=sides)))
		} else {
			Ok(0)
		}
	}
}

/// Generates rolls that always have a specific face value.
///
/// # Examples
/// ```
/// use dicebot::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let mut roller = ValRoller(4);
/// let rolled = roller.roll(&dice, true)?;
/// assert!(rolled.rolls.iter().all(|roll| roll.val == 4));
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub i32);

impl Roller for Val {
	/// Rolls a single die, always with one specific face value.
	#[inline]
	fn roll_face(&mut self, _sides: u32) -> Result<i32, Error> {
		Ok(self.0)
	}
}

/// Generates rolls that always have their max face value.
///
/// # Examples
/// ```
/// use dicebot::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let dice = Dice::new(2, 20);
/// let rolled = MaxRoller.roll(&dice, true)?;
/// assert_eq!(rolled.total(), 40);
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max face value (same as the number of sides).
	#[inline]
	fn roll_face(&mut self, sides: u32) -> Result<i32, Error> {
		Ok(face_from(sides))
	}
}

/// Generates rolls from an iterator of face values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dicebot::dice::{roller::{Iter as IterRoller, Roller}, Dice, DieRoll};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let dice = Dice::new(5, 6);
/// assert_eq!(
/// 	roller.roll(&dice, true)?.rolls,
/// 	vec![DieRoll::new(1), DieRoll::new(2), DieRoll::new(3), DieRoll::new(4), DieRoll::new(10)]
/// );
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = i32>>(Peekable<I>);

impl<I: Iterator<Item = i32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = i32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Errors
	/// If the iterator has finished, [`Error::Exhausted`] is returned.
	#[inline]
	fn roll_face(&mut self, _sides: u32) -> Result<i32, Error> {
		self.0.next().ok_or(Error::Exhausted)
	}
}

/// Converts a face in `1..=MAX_SIDES` into a roll value.
fn face_from(face: u32) -> i32 {
	i32::try_from(face).unwrap_or(i32::MAX)
}
