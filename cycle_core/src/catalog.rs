//! Built-in phase guidance, symptom ordering, and the check-in scorecard.
//!
//! Static content the display layer renders next to the computed phase.
//! Built once and cached; the data never changes at runtime.

use crate::Phase;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Per-phase guidance shown on the today view
#[derive(Clone, Debug)]
pub struct PhaseGuidance {
    pub phase: Phase,
    pub energy: &'static str,
    pub focus: &'static str,
    pub social: &'static str,
    pub physical: &'static str,
    pub advice: &'static [&'static str],
    /// One calm, non-prescriptive sentence of context
    pub context: &'static str,
}

/// Advice line substituted in the last days before the next period
pub const LATE_LUTEAL_ADVICE: &str =
    "Late luteal: keep plans light and choose lower-impact movement if energy dips.";

/// Cached guidance table, built once
static GUIDANCE: Lazy<HashMap<Phase, PhaseGuidance>> = Lazy::new(build_guidance);

/// Guidance for a phase
pub fn guidance_for(phase: Phase) -> &'static PhaseGuidance {
    &GUIDANCE[&phase]
}

fn build_guidance() -> HashMap<Phase, PhaseGuidance> {
    let mut table = HashMap::new();

    table.insert(
        Phase::Menstrual,
        PhaseGuidance {
            phase: Phase::Menstrual,
            energy: "Low, restorative",
            focus: "Single tasks, reflection",
            social: "Low capacity, selective",
            physical: "Gentle, minimal",
            advice: &[
                "Protect your energy today — one thing at a time.",
                "Warmth, rest, and simple food go a long way.",
            ],
            context: "Energy may feel quieter. A slower pace can feel more natural.",
        },
    );

    table.insert(
        Phase::Follicular,
        PhaseGuidance {
            phase: Phase::Follicular,
            energy: "Rising, building",
            focus: "Creative work, new starts",
            social: "Engaged, open",
            physical: "Increasing capacity",
            advice: &[
                "Good time to start something you've been putting off.",
                "Lean into clarity — your mind is at its sharpest.",
            ],
            context: "Momentum may build gradually. Planning or starting can feel easier.",
        },
    );

    table.insert(
        Phase::Ovulatory,
        PhaseGuidance {
            phase: Phase::Ovulatory,
            energy: "High, outward",
            focus: "Collaboration, expression",
            social: "Very engaged, magnetic",
            physical: "Strong, peak output",
            advice: &[
                "Say yes to connection — this is your social window.",
                "Tackle the conversation or task you've been avoiding.",
            ],
            context: "Communication and outward energy may feel more accessible.",
        },
    );

    table.insert(
        Phase::Luteal,
        PhaseGuidance {
            phase: Phase::Luteal,
            energy: "Declining, inward",
            focus: "Detail work, completion",
            social: "Selective socialising",
            physical: "Moderate, grounding",
            advice: &[
                "Prioritise essentials. Keep plans simple. Finish what matters.",
                "Leave buffer between commitments — your body needs space.",
            ],
            context: "Focus may shift inward. Leaving more space between commitments can help.",
        },
    );

    table
}

// ============================================================================
// Symptom ordering
// ============================================================================

/// Symptoms ordered by how commonly they are reported in each phase, so the
/// check-in screen can surface the likely ones first
pub fn symptoms_for(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Menstrual => &[
            "Cramps",
            "Bloating",
            "Fatigue",
            "Headache",
            "Low mood",
            "Breast tenderness",
            "Back pain",
            "Nausea",
            "Heavy flow",
            "Light flow",
            "Spotting",
            "Brain fog",
            "Sleepy",
            "Food cravings",
            "Sleep issues",
            "Low energy",
            "Irritable",
            "Anxiety",
            "Feeling overwhelmed",
            "Water retention",
        ],
        Phase::Follicular => &[
            "Low energy",
            "Brain fog",
            "Acne",
            "Dry skin",
            "Sleepy",
            "Headache",
            "Bloating",
            "Fatigue",
            "Food cravings",
            "Anxiety",
            "Irritable",
            "Low mood",
            "Breast tenderness",
            "Cramps",
            "Back pain",
            "Sleep issues",
        ],
        Phase::Ovulatory => &[
            "Ovulation pain",
            "Increased discharge",
            "Breast tenderness",
            "Bloating",
            "Headache",
            "Fatigue",
            "Spotting",
            "Acne",
            "Anxiety",
            "Irritable",
            "Low mood",
            "Cramps",
            "Back pain",
            "Brain fog",
        ],
        Phase::Luteal => &[
            "Bloating",
            "Breast tenderness",
            "Irritable",
            "Anxiety",
            "Food cravings",
            "Fatigue",
            "Sleep issues",
            "Headache",
            "Water retention",
            "Brain fog",
            "Acne",
            "Constipation",
            "Back pain",
            "Low energy",
            "Feeling overwhelmed",
            "Low mood",
        ],
    }
}

// ============================================================================
// Scorecard
// ============================================================================

/// One question on the daily check-in scorecard
///
/// Options are ordered worst to best; the stored score is the 1-based
/// index into them.
#[derive(Clone, Debug)]
pub struct ScorecardItem {
    pub key: &'static str,
    pub label: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
}

/// The daily check-in scorecard, in display order
pub fn scorecard() -> &'static [ScorecardItem] {
    &SCORECARD
}

/// Look up a scorecard item by key
pub fn scorecard_item(key: &str) -> Option<&'static ScorecardItem> {
    SCORECARD.iter().find(|item| item.key == key)
}

static SCORECARD: [ScorecardItem; 10] = [
    ScorecardItem {
        key: "nutrition",
        label: "Nutrition",
        question: "How did you eat today?",
        options: &["Skipped / irregular", "Unbalanced", "Okay", "Nourishing", "Very balanced"],
    },
    ScorecardItem {
        key: "movement",
        label: "Movement / Sport",
        question: "How active were you today?",
        options: &["None", "Minimal", "Gentle", "Balanced", "Heavy workout"],
    },
    ScorecardItem {
        key: "sleep",
        label: "Sleep",
        question: "How well did you sleep last night?",
        options: &["Very poor", "Poor", "Okay", "Good", "Very good"],
    },
    ScorecardItem {
        key: "meditation",
        label: "Quiet Time / Meditation",
        question: "Did you get a pause or reset today?",
        options: &["Not at all", "Brief pause", "Short reset", "Meaningful pause", "Deep reset"],
    },
    ScorecardItem {
        key: "mood",
        label: "Mood",
        question: "How steady did you feel emotionally?",
        options: &["Low", "Unsettled", "Neutral", "Positive", "Grounded"],
    },
    ScorecardItem {
        key: "work",
        label: "Work / Focus",
        question: "How did focus feel today?",
        options: &["Scattered", "Hard to focus", "Neutral", "Clear", "In flow"],
    },
    ScorecardItem {
        key: "social",
        label: "Social Energy",
        question: "How social did you feel today?",
        options: &["Reserved", "Low capacity", "Selective", "Engaged", "Very social"],
    },
    ScorecardItem {
        key: "relationships",
        label: "Relationship",
        question: "How connected did you feel with your partner?",
        options: &[
            "Tense / distant",
            "Slightly disconnected",
            "Neutral",
            "Warm",
            "Deeply connected",
        ],
    },
    ScorecardItem {
        key: "intimacy",
        label: "Intimacy",
        question: "How open did you feel to intimacy?",
        options: &["None", "Low", "Some", "Strong", "Very strong"],
    },
    ScorecardItem {
        key: "overall",
        label: "Overall",
        question: "Overall, how did you feel today?",
        options: &["Drained", "Low energy", "Balanced", "Strong", "Very good"],
    },
];

/// Supplement choices offered on the check-in screen
pub const VITAMIN_OPTIONS: &[&str] = &[
    "Vitamin D",
    "Magnesium",
    "Omega-3",
    "Iron",
    "B-complex",
    "Probiotic",
    "Other",
];
