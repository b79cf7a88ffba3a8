//! Keyword-matched canned response selection.
//!
//! The selector is a total pure function over a fixed ordered table of
//! (keyword group, reply) rules. Matching is lower-cased substring
//! containment; the first rule with a hit wins, and inputs matching no
//! rule get the generic see-a-professional disclaimer.

/// One entry in the response table: any keyword hit selects the reply.
pub struct ResponseRule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Ordered rule table. Order is the match priority: an input containing
/// both "fever" and "headache" gets the headache reply.
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        keywords: &["headache"],
        reply: "For a headache, rest in a quiet, dark room and stay hydrated. \
                An over-the-counter pain reliever such as ibuprofen or acetaminophen may help. \
                If the headache is sudden and severe, or comes with vision changes or a stiff neck, \
                seek medical care right away.",
    },
    ResponseRule {
        keywords: &["fever"],
        reply: "A fever is often a sign that your body is fighting an infection. \
                Rest, drink plenty of fluids, and consider acetaminophen to bring your temperature down. \
                See a doctor if the fever goes above 103\u{b0}F (39.4\u{b0}C) or lasts more than three days.",
    },
    ResponseRule {
        keywords: &["cold", "flu"],
        reply: "For cold and flu symptoms, get plenty of rest, stay hydrated, \
                and try warm fluids like tea with honey. Over-the-counter remedies can ease \
                congestion and body aches. If symptoms get worse after a week or you have \
                trouble breathing, consult a doctor.",
    },
    ResponseRule {
        keywords: &["cough"],
        reply: "For a cough, warm fluids, honey, and a humidifier can soothe your throat. \
                A cough lasting more than three weeks, or one with blood or chest pain, \
                should be evaluated by a doctor.",
    },
];

/// Reply used when no rule matches.
pub const FALLBACK_REPLY: &str =
    "I can help with general questions about common symptoms. \
     For an accurate diagnosis and advice tailored to you, \
     please consult a qualified healthcare professional.";

/// Select the canned reply for a user message.
///
/// Deterministic and stateless: the same input always yields the same one
/// of five fixed strings.
pub fn select_response(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headache_reply() -> &'static str {
        RESPONSE_RULES[0].reply
    }

    fn fever_reply() -> &'static str {
        RESPONSE_RULES[1].reply
    }

    #[test]
    fn test_headache_any_case_any_position() {
        for input in [
            "I have a headache",
            "HEADACHE since this morning",
            "my HeAdAcHe is awful",
            "woke up with a pounding headache today",
        ] {
            assert_eq!(select_response(input), headache_reply(), "input: {input}");
        }
    }

    #[test]
    fn test_headache_wins_over_fever() {
        // First-match priority: headache outranks fever regardless of order.
        assert_eq!(
            select_response("fever and headache since yesterday"),
            headache_reply()
        );
        assert_eq!(
            select_response("headache plus a slight fever"),
            headache_reply()
        );
    }

    #[test]
    fn test_fever_matches() {
        assert_eq!(select_response("running a fever"), fever_reply());
    }

    #[test]
    fn test_cold_or_flu_share_a_reply() {
        assert_eq!(
            select_response("caught a cold"),
            select_response("got the flu")
        );
        assert_eq!(select_response("caught a cold"), RESPONSE_RULES[2].reply);
    }

    #[test]
    fn test_cough_matches() {
        assert_eq!(select_response("dry cough at night"), RESPONSE_RULES[3].reply);
    }

    #[test]
    fn test_no_keyword_falls_back() {
        for input in ["hello", "my knee hurts", "what should I eat?", "    "] {
            assert_eq!(select_response(input), FALLBACK_REPLY, "input: {input}");
        }
    }

    #[test]
    fn test_deterministic() {
        let a = select_response("some cough");
        let b = select_response("some cough");
        assert_eq!(a, b);
    }
}
