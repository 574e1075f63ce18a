//! Participant and opponent-class filtering.
//!
//! Identity comparison is case-insensitive; the identities handed back keep
//! the casing found in the transcript.
//!
//! If both participants appear in the target list (a mirror match), the
//! target listed first wins; within one target, `p1` is checked before `p2`.

use crate::transcript::{Side, Transcript};

/// Sides of an accepted transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing<'a> {
    pub target_side: Side,
    pub target: &'a str,
    pub opponent: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Verdict<'a> {
    Accepted(Pairing<'a>),
    /// Neither participant is a target.
    NoTarget,
    /// A target played, but against an opponent outside the bot class.
    OpponentNotBot { target: &'a str, opponent: &'a str },
}

impl<'a> Verdict<'a> {
    #[must_use]
    pub fn accepted(self) -> Option<Pairing<'a>> {
        match self {
            Verdict::Accepted(pairing) => Some(pairing),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchFilter {
    /// Lowercased target identities, in priority order.
    targets: Vec<String>,
    opponent_prefix: String,
}

impl MatchFilter {
    pub fn new<I, S>(targets: I, opponent_prefix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            targets: targets
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            opponent_prefix: opponent_prefix.to_lowercase(),
        }
    }

    #[must_use]
    pub fn is_bot(&self, identity: &str) -> bool {
        identity.to_lowercase().starts_with(&self.opponent_prefix)
    }

    /// Finds the side played by the highest-priority target, if any.
    #[must_use]
    pub fn target_side(&self, transcript: &Transcript) -> Option<Side> {
        let p1 = transcript.p1.to_lowercase();
        let p2 = transcript.p2.to_lowercase();
        self.targets.iter().find_map(|target| {
            if *target == p1 {
                Some(Side::P1)
            } else if *target == p2 {
                Some(Side::P2)
            } else {
                None
            }
        })
    }

    #[must_use]
    pub fn check<'t>(&self, transcript: &'t Transcript) -> Verdict<'t> {
        let Some(target_side) = self.target_side(transcript) else {
            return Verdict::NoTarget;
        };
        let opponent_side = match target_side {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        };
        let target = transcript.participant(target_side);
        let opponent = transcript.participant(opponent_side);
        if !self.is_bot(opponent) {
            return Verdict::OpponentNotBot { target, opponent };
        }
        Verdict::Accepted(Pairing {
            target_side,
            target,
            opponent,
        })
    }
}
