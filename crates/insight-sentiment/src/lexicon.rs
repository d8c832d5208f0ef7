//! Word lists used by the analyzer.
//!
//! Valences range from -4 (most negative) to +4 (most positive).

use std::collections::HashMap;

/// Increment added by an intensifier ("very", "extremely").
pub(crate) const BOOST_INCR: f64 = 0.293;
/// Decrement applied by a dampener ("slightly", "barely").
pub(crate) const BOOST_DECR: f64 = -0.293;
/// Extra emphasis for an ALL-CAPS word in mixed-case text.
pub(crate) const CAPS_INCR: f64 = 0.733;
/// Scaling applied to a negated valence.
pub(crate) const NEGATION_SCALAR: f64 = -0.74;

pub(crate) fn valences() -> HashMap<&'static str, f64> {
    [
        // General positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 2.7),
        ("amazing", 2.8),
        ("awesome", 3.1),
        ("best", 3.2),
        ("better", 1.9),
        ("positive", 2.6),
        ("optimistic", 1.3),
        ("optimism", 2.5),
        ("hope", 1.9),
        ("hopeful", 1.9),
        ("happy", 2.7),
        ("confident", 2.2),
        ("confidence", 2.3),
        ("success", 2.7),
        ("successful", 2.8),
        ("win", 2.8),
        ("wins", 2.7),
        ("winning", 2.4),
        ("strong", 2.3),
        ("stronger", 2.1),
        ("strength", 2.2),
        ("support", 1.7),
        ("supports", 1.5),
        ("like", 2.0),
        ("love", 3.2),
        ("nice", 1.8),
        ("safe", 1.9),
        ("secure", 1.4),
        ("trust", 2.3),
        ("welcome", 2.0),
        ("boost", 1.7),
        ("boosts", 1.3),
        ("benefit", 2.0),
        ("benefits", 1.6),
        ("opportunity", 1.8),
        ("opportunities", 1.6),
        ("growth", 1.6),
        ("improve", 1.9),
        ("improved", 2.1),
        ("improvement", 2.0),
        ("record", 0.9),
        ("approve", 1.8),
        ("approved", 1.8),
        ("approval", 2.2),
        ("innovation", 1.6),
        ("innovative", 1.9),
        ("profit", 1.9),
        ("profits", 1.9),
        ("profitable", 1.9),
        ("gain", 2.4),
        ("gains", 1.6),
        ("rally", 1.5),
        ("rallies", 1.5),
        ("surge", 1.4),
        ("surges", 1.4),
        ("soar", 2.2),
        ("soars", 2.2),
        ("soaring", 2.1),
        ("recover", 1.6),
        ("recovery", 1.4),
        ("rebound", 1.3),
        ("bullish", 1.8),
        ("upgrade", 1.5),
        ("adoption", 1.2),
        ("breakthrough", 2.0),
        ("milestone", 1.4),
        ("high", 0.9),
        ("higher", 0.9),
        // General negative
        ("bad", -2.5),
        ("worse", -2.1),
        ("worst", -3.1),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("poor", -2.1),
        ("negative", -2.7),
        ("pessimistic", -1.5),
        ("fear", -2.2),
        ("fears", -1.8),
        ("worry", -1.9),
        ("worries", -1.8),
        ("worried", -1.2),
        ("concern", -1.5),
        ("concerns", -1.3),
        ("uncertain", -1.2),
        ("uncertainty", -1.4),
        ("risk", -1.1),
        ("risks", -1.1),
        ("risky", -1.4),
        ("danger", -2.4),
        ("dangerous", -2.1),
        ("panic", -2.3),
        ("weak", -1.9),
        ("weaker", -1.9),
        ("weakness", -1.5),
        ("fail", -2.5),
        ("fails", -1.8),
        ("failed", -2.3),
        ("failure", -2.3),
        ("loss", -1.3),
        ("losses", -1.7),
        ("lose", -1.7),
        ("losing", -1.6),
        ("lost", -1.3),
        ("crash", -1.7),
        ("crashes", -1.7),
        ("collapse", -2.2),
        ("collapses", -2.0),
        ("plunge", -1.6),
        ("plunges", -1.6),
        ("slump", -1.6),
        ("slumps", -1.6),
        ("tumble", -1.3),
        ("tumbles", -1.3),
        ("drop", -1.1),
        ("drops", -1.1),
        ("decline", -1.1),
        ("declines", -1.1),
        ("selloff", -1.5),
        ("bearish", -1.8),
        ("downgrade", -1.6),
        ("hack", -2.0),
        ("hacked", -1.7),
        ("hackers", -1.5),
        ("exploit", -1.6),
        ("scam", -2.7),
        ("fraud", -2.8),
        ("theft", -2.5),
        ("stolen", -2.4),
        ("lawsuit", -1.4),
        ("ban", -2.6),
        ("banned", -2.0),
        ("crackdown", -1.8),
        ("investigation", -0.8),
        ("sued", -1.3),
        ("warning", -1.4),
        ("warns", -0.4),
        ("volatile", -0.8),
        ("volatility", -0.6),
        ("bankrupt", -2.6),
        ("bankruptcy", -2.5),
        ("outage", -1.4),
        ("delay", -1.3),
        ("delayed", -0.9),
        ("problem", -1.7),
        ("problems", -1.7),
        ("trouble", -1.7),
        ("crisis", -3.1),
        ("low", -1.1),
        ("lower", -1.2),
    ]
    .into_iter()
    .collect()
}

/// Intensifiers and dampeners with the increment they apply.
pub(crate) fn boosters() -> HashMap<&'static str, f64> {
    [
        ("absolutely", BOOST_INCR),
        ("completely", BOOST_INCR),
        ("enormously", BOOST_INCR),
        ("especially", BOOST_INCR),
        ("extremely", BOOST_INCR),
        ("highly", BOOST_INCR),
        ("hugely", BOOST_INCR),
        ("incredibly", BOOST_INCR),
        ("massively", BOOST_INCR),
        ("most", BOOST_INCR),
        ("really", BOOST_INCR),
        ("remarkably", BOOST_INCR),
        ("significantly", BOOST_INCR),
        ("so", BOOST_INCR),
        ("strongly", BOOST_INCR),
        ("totally", BOOST_INCR),
        ("very", BOOST_INCR),
        ("almost", BOOST_DECR),
        ("barely", BOOST_DECR),
        ("hardly", BOOST_DECR),
        ("marginally", BOOST_DECR),
        ("partly", BOOST_DECR),
        ("slightly", BOOST_DECR),
        ("somewhat", BOOST_DECR),
        ("little", BOOST_DECR),
    ]
    .into_iter()
    .collect()
}

pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "nowhere",
    "without", "cannot", "cant", "can't", "dont", "don't", "doesnt", "doesn't",
    "didnt", "didn't", "isnt", "isn't", "arent", "aren't", "wasnt", "wasn't",
    "werent", "weren't", "wont", "won't", "wouldnt", "wouldn't", "shouldnt",
    "shouldn't", "couldnt", "couldn't", "hasnt", "hasn't", "havent", "haven't",
    "aint", "ain't", "rarely", "seldom", "despite",
];
