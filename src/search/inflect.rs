//! Singular/plural counterparts for ingredient words.
//!
//! English only, tuned for food vocabulary. The goal is recall during candidate
//! generation ("egg" should find "eggs" and vice versa), not perfect grammar.

const IRREGULAR: &[(&str, &str)] = &[
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("half", "halves"),
    ("knife", "knives"),
    ("calf", "calves"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("mango", "mangoes"),
    ("chili", "chilies"),
];

/// Singulars ending in "ie", whose "-ies" plural must not become "-y".
const IE_NOUNS: &[&str] = &[
    "pie", "cookie", "brownie", "veggie", "calorie", "smoothie", "chile", "birdie",
];

/// Singulars ending in "i", whose "-is" plural is otherwise read as singular.
const I_NOUNS: &[&str] = &[
    "kiwi", "chili", "chilli", "salami", "wasabi", "tahini", "pastrami", "bhaji",
];

const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

const SIBILANT_ENDINGS: &[&str] = &["s", "x", "z", "ch", "sh"];

/// Returns the plural of a singular-looking word and the singular of a plural-looking one.
///
/// Words shorter than three characters are returned unchanged.
pub fn counterpart(word: &str) -> String {
    if word.chars().count() < 3 {
        return word.to_string();
    }

    for &(singular, plural) in IRREGULAR {
        if word == singular {
            return plural.to_string();
        }
        if word == plural {
            return singular.to_string();
        }
    }

    if looks_plural(word) {
        singularize(word)
    } else {
        pluralize(word)
    }
}

fn looks_plural(word: &str) -> bool {
    if let Some(stem) = word.strip_suffix('s')
        && I_NOUNS.contains(&stem)
    {
        return true;
    }

    word.ends_with('s') && !SINGULAR_ENDINGS.iter().any(|end| word.ends_with(end))
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('s')
        && (IE_NOUNS.contains(&stem) || I_NOUNS.contains(&stem))
    {
        return stem.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }

    if let Some(stem) = word.strip_suffix("es")
        && ["ss", "x", "z", "ch", "sh"]
            .iter()
            .any(|end| stem.ends_with(end))
    {
        return stem.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y')
        && !stem.ends_with(is_vowel)
    {
        return format!("{stem}ies");
    }

    if SIBILANT_ENDINGS.iter().any(|end| word.ends_with(end)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plural_and_singular() {
        assert_eq!(counterpart("egg"), "eggs");
        assert_eq!(counterpart("eggs"), "egg");
        assert_eq!(counterpart("onion"), "onions");
        assert_eq!(counterpart("onions"), "onion");
    }

    #[test]
    fn test_consonant_y() {
        assert_eq!(counterpart("berry"), "berries");
        assert_eq!(counterpart("berries"), "berry");
        assert_eq!(counterpart("turkey"), "turkeys");
    }

    #[test]
    fn test_sibilants() {
        assert_eq!(counterpart("peach"), "peaches");
        assert_eq!(counterpart("peaches"), "peach");
        assert_eq!(counterpart("radish"), "radishes");
        assert_eq!(counterpart("radishes"), "radish");
        assert_eq!(counterpart("box"), "boxes");
    }

    #[test]
    fn test_irregular_table() {
        assert_eq!(counterpart("leaf"), "leaves");
        assert_eq!(counterpart("leaves"), "leaf");
        assert_eq!(counterpart("tomatoes"), "tomato");
        assert_eq!(counterpart("potato"), "potatoes");
    }

    #[test]
    fn test_ve_plural_keeps_e() {
        assert_eq!(counterpart("olives"), "olive");
        assert_eq!(counterpart("cloves"), "clove");
    }

    #[test]
    fn test_singular_s_endings() {
        assert_eq!(counterpart("hummus"), "hummuses");
        assert_eq!(counterpart("asparagus"), "asparaguses");
        assert_eq!(counterpart("swiss"), "swisses");
    }

    #[test]
    fn test_ie_plurals_keep_ie() {
        assert_eq!(counterpart("pies"), "pie");
        assert_eq!(counterpart("cookies"), "cookie");
        assert_eq!(counterpart("brownies"), "brownie");
        assert_eq!(counterpart("veggies"), "veggie");
        assert_eq!(counterpart("calories"), "calorie");
        assert_eq!(counterpart("pie"), "pies");
        assert_eq!(counterpart("cookie"), "cookies");
    }

    #[test]
    fn test_i_nouns() {
        assert_eq!(counterpart("kiwis"), "kiwi");
        assert_eq!(counterpart("kiwi"), "kiwis");
        assert_eq!(counterpart("chilis"), "chili");
        assert_eq!(counterpart("chilies"), "chili");
        assert_eq!(counterpart("chili"), "chilies");
        assert_eq!(counterpart("chiles"), "chile");
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(counterpart("ox"), "ox");
        assert_eq!(counterpart(""), "");
    }
}
