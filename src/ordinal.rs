//! Number to ordinal word conversion used when a label starts with digits.
//!
//! Words are capitalized and joined without separators so the result can be
//! dropped straight into an identifier: `21` becomes `TwentyFirst`.

/// Spells out numbers as identifier-friendly ordinal words.
pub trait NumberWords {
    /// Cardinal words for `n`, camel-joined, with the last word made ordinal.
    fn ordinal_words(&self, n: u64) -> String;

    /// The written suffix that marks `n` as an ordinal (`st` in `1st`), if the
    /// language has one. A label's digit run followed by this suffix is
    /// expanded as a single unit.
    fn ordinal_suffix(&self, _n: u64) -> Option<&'static str> {
        None
    }
}

/// English number words in the British style, `101` is `OneHundredAndFirst`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishOrdinals;

const UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

impl EnglishOrdinals {
    fn cardinal(n: u64) -> Vec<&'static str> {
        if n == 0 {
            return vec![UNITS[0]];
        }

        let mut words = Vec::new();
        let mut rest = n;

        for (scale, name) in SCALES {
            if rest >= scale {
                words.extend(Self::cardinal(rest / scale));
                words.push(name);
                rest %= scale;
            }
        }

        if rest >= 100 {
            words.push(UNITS[(rest / 100) as usize]);
            words.push("hundred");
            rest %= 100;
        }

        if rest > 0 {
            if !words.is_empty() {
                words.push("and");
            }
            if rest < 20 {
                words.push(UNITS[rest as usize]);
            } else {
                words.push(TENS[(rest / 10) as usize]);
                if rest % 10 > 0 {
                    words.push(UNITS[(rest % 10) as usize]);
                }
            }
        }

        words
    }

    fn ordinalize(word: &str) -> String {
        match word {
            "one" => "first".to_string(),
            "two" => "second".to_string(),
            "three" => "third".to_string(),
            "five" => "fifth".to_string(),
            "eight" => "eighth".to_string(),
            "nine" => "ninth".to_string(),
            "twelve" => "twelfth".to_string(),
            w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
            w => format!("{}th", w),
        }
    }
}

fn capitalize(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

impl NumberWords for EnglishOrdinals {
    fn ordinal_words(&self, n: u64) -> String {
        let words = Self::cardinal(n);
        let mut out = String::new();

        if let Some((last, init)) = words.split_last() {
            for word in init {
                capitalize(word, &mut out);
            }
            capitalize(&Self::ordinalize(last), &mut out);
        }

        out
    }

    fn ordinal_suffix(&self, n: u64) -> Option<&'static str> {
        let suffix = match (n % 100, n % 10) {
            (11..=13, _) => "th",
            (_, 1) => "st",
            (_, 2) => "nd",
            (_, 3) => "rd",
            _ => "th",
        };
        Some(suffix)
    }
}
