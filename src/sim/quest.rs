//! Quest goals and progress
//!
//! The goal roster is fixed configuration data: an ordered list of plays the
//! player delivers to the hoop one by one. Progress is an index into the
//! roster plus the pickup/deliver step for the active goal.

/// One entry in the fixed, ordered goal roster
#[derive(Debug, Clone, Copy)]
pub struct QuestGoal {
    pub id: u32,
    /// Short name shown at the rack and in the mission banner
    pub label: &'static str,
    /// Modal headline
    pub title: &'static str,
    pub description: &'static str,
    /// CSS color for zone/modal accents
    pub color: &'static str,
    /// Icon class rendered in the modal header
    pub icon: &'static str,
    pub examples: &'static [&'static str],
    /// The value line shown at the bottom of the modal
    pub payoff: &'static str,
}

/// The full roster, in play order
pub const GOALS: &[QuestGoal] = &[
    QuestGoal {
        id: 1,
        label: "Fast Break",
        title: "Run the Fast Break",
        description: "Push the ball up the floor before the defense can set. \
                      The first outlet pass decides whether the possession is a \
                      layup or a half-court grind.",
        color: "#f59e0b",
        icon: "fa-bolt",
        examples: &[
            "Rebound, outlet, two dribbles, finish",
            "Wing sprints wide to stretch the retreat",
            "Trailer fills the middle lane late",
            "Pull the ball out if the numbers are even",
        ],
        payoff: "Easy points before the defense exists.",
    },
    QuestGoal {
        id: 2,
        label: "Pick and Roll",
        title: "Master the Pick and Roll",
        description: "A solid screen forces two defenders to make a choice, and \
                      every choice is wrong. Read the coverage, then take what \
                      the defense concedes.",
        color: "#38bdf8",
        icon: "fa-people-arrows",
        examples: &[
            "Drag screen early in the clock",
            "Reject the screen when the defender cheats over",
            "Short roll against the hard hedge",
            "Slip to the rim when the switch is slow",
        ],
        payoff: "Two-on-two math the offense always wins.",
    },
    QuestGoal {
        id: 3,
        label: "Full-Court Press",
        title: "Turn Up the Full-Court Press",
        description: "Ninety-four feet of pressure wears down ball handlers and \
                      buys cheap possessions. The trap is a bet that panic beats \
                      poise.",
        color: "#f87171",
        icon: "fa-hand-fist",
        examples: &[
            "Trap the first pass after the inbound",
            "Deny the reversal, force the lob",
            "Rotate behind the trap to steal the outlet",
            "Fall back to half court once the rhythm breaks",
        ],
        payoff: "Turnovers without running a single play.",
    },
    QuestGoal {
        id: 4,
        label: "Zone Defense",
        title: "Anchor the Zone Defense",
        description: "Guard space, not shirts. A disciplined 2-3 shuts the paint \
                      and dares tired legs to shoot over the top.",
        color: "#34d399",
        icon: "fa-shield-halved",
        examples: &[
            "Bump cutters through the middle",
            "Close out with high hands on the wing",
            "Rebound by zone, not by man",
            "Match up out of the zone on late clock",
        ],
        payoff: "The rim stays closed for an entire quarter.",
    },
    QuestGoal {
        id: 5,
        label: "Buzzer Beater",
        title: "Draw Up the Buzzer Beater",
        description: "One possession, one look. The last play of the game is \
                      rehearsed in practice a hundred times so nobody has to \
                      think when it counts.",
        color: "#c084fc",
        icon: "fa-stopwatch",
        examples: &[
            "Screen the inbounder, not the shooter",
            "Curl off the elevator doors",
            "Fake the handoff, back-cut baseline",
            "Leave 0.8 seconds for the catch and release",
        ],
        payoff: "Seasons are remembered by this shot.",
    },
];

/// Two-phase step for the active goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStep {
    /// Heading to the rack for the ball
    Pickup,
    /// Carrying the ball to the hoop
    Deliver,
}

/// Position in the roster: goal index plus the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestProgress {
    /// 0-based roster index, monotonically non-decreasing between resets
    pub index: usize,
    pub step: QuestStep,
}

impl Default for QuestProgress {
    fn default() -> Self {
        Self {
            index: 0,
            step: QuestStep::Pickup,
        }
    }
}

impl QuestProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The goal the player is currently working on
    pub fn active_goal(&self) -> Option<&'static QuestGoal> {
        GOALS.get(self.index)
    }

    /// Whether the active goal is the roster's last
    pub fn on_last_goal(&self) -> bool {
        self.index + 1 >= GOALS.len()
    }
}
