//! Scripted input for headless runs.
//!
//! A script is a list of steps separated by commas or whitespace. Each step is
//! one or more `+`-joined actions optionally followed by `*COUNT`, which
//! repeats the step for `COUNT` ticks. `left+attack*3,idle,slot2,regen,quit`
//! holds left while attacking for three ticks, idles one tick, equips slot two,
//! regenerates the world and quits.

use glade_core::{FrameIntent, WeaponSlot};
use thiserror::Error;

/// Errors produced while parsing a script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A step named an action that does not exist.
    #[error("unknown action `{token}` in step {step}")]
    UnknownToken {
        /// One-based index of the offending step.
        step: usize,
        /// The unrecognised action.
        token: String,
    },
    /// A repeat count was not a positive integer.
    #[error("invalid repeat count `{count}` in step {step}")]
    InvalidCount {
        /// One-based index of the offending step.
        step: usize,
        /// The text after `*`.
        count: String,
    },
    /// A step contained an empty action.
    #[error("step {step} contains an empty action")]
    EmptyStep {
        /// One-based index of the offending step.
        step: usize,
    },
}

/// Expands `source` into one intent per tick.
pub(crate) fn parse_script(source: &str) -> Result<Vec<FrameIntent>, ScriptError> {
    let mut intents = Vec::new();
    let words = source
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|word| !word.is_empty());
    for (index, word) in words.enumerate() {
        let step = index + 1;
        let (actions, count) = match word.split_once('*') {
            Some((actions, count)) => (actions, parse_count(step, count)?),
            None => (word, 1),
        };

        let intent = parse_step(step, actions)?;
        intents.extend(std::iter::repeat(intent).take(count));
    }

    Ok(intents)
}

fn parse_count(step: usize, count: &str) -> Result<usize, ScriptError> {
    match count.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ScriptError::InvalidCount {
            step,
            count: count.to_owned(),
        }),
    }
}

fn parse_step(step: usize, actions: &str) -> Result<FrameIntent, ScriptError> {
    let mut intent = FrameIntent::idle();
    for action in actions.split('+') {
        match action {
            "" => return Err(ScriptError::EmptyStep { step }),
            "idle" => {}
            "left" => intent.move_left = true,
            "right" => intent.move_right = true,
            "up" => intent.move_up = true,
            "down" => intent.move_down = true,
            "attack" => intent.attack = true,
            "regen" => intent.regenerate = true,
            "quit" => intent.quit = true,
            other => {
                intent.select_slot = Some(parse_slot(other).ok_or_else(|| {
                    ScriptError::UnknownToken {
                        step,
                        token: other.to_owned(),
                    }
                })?);
            }
        }
    }

    Ok(intent)
}

fn parse_slot(action: &str) -> Option<WeaponSlot> {
    let number = action.strip_prefix("slot")?.parse::<u8>().ok()?;
    if number > 4 {
        return None;
    }
    WeaponSlot::new(number)
}
