//! Lexicon-based sentiment scoring
//!
//! Every known adjective carries a polarity and a subjectivity. The page score
//! is the mean over all hits; a negation word directly before a hit flips and
//! halves its polarity. Text without hits scores 0.0 / 0.0.

use crate::extract::document::Sentiment;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("cheap", 0.4, 0.7),
    ("easy", 0.43, 0.83),
    ("excellent", 1.0, 1.0),
    ("expensive", -0.5, 0.7),
    ("fantastic", 0.4, 0.9),
    ("fast", 0.2, 0.6),
    ("free", 0.4, 0.8),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hard", -0.29, 0.54),
    ("horrible", -1.0, 1.0),
    ("important", 0.4, 1.0),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("new", 0.14, 0.45),
    ("perfect", 1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("safe", 0.5, 0.5),
    ("slow", -0.3, 0.39),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("wonderful", 1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "n't", "without"];

fn lookup(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(entry, _, _)| *entry == word)
        .map(|(_, polarity, subjectivity)| (*polarity, *subjectivity))
}

/// Scores `text`
///
/// # Examples
///
/// ```
/// use domain_sweep::extract::score_sentiment;
///
/// let positive = score_sentiment("A great and wonderful day");
/// assert!(positive.polarity > 0.0);
///
/// let negated = score_sentiment("not good");
/// assert!(negated.polarity < 0.0);
/// ```
pub fn score_sentiment(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
        .collect();

    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut hits = 0usize;

    for (i, word) in words.iter().enumerate() {
        let Some((mut polarity, subjectivity)) = lookup(word) else {
            continue;
        };

        let negated = i > 0
            && (NEGATIONS.contains(&words[i - 1]) || words[i - 1].ends_with("n't"));
        if negated {
            polarity *= -0.5;
        }

        polarity_sum += polarity;
        subjectivity_sum += subjectivity;
        hits += 1;
    }

    if hits == 0 {
        return Sentiment {
            polarity: 0.0,
            subjectivity: 0.0,
        };
    }

    Sentiment {
        polarity: (polarity_sum / hits as f64).clamp(-1.0, 1.0),
        subjectivity: (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
    }
}
