//! Name derivation for resources and views.

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Whole-word irregular plurals.
const IRREGULAR: &[(&str, &str)] = &[
    ("buses", "bus"),
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Plural endings tried before the regular rules, longest stems first.
const ENDINGS: &[(&str, &str)] = &[
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("statuses", "status"),
    ("campuses", "campus"),
    ("viruses", "virus"),
    ("aliases", "alias"),
    ("bonuses", "bonus"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("theses", "thesis"),
    ("quizzes", "quiz"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
];

/// English singular of a collection name.
///
/// Only the last `_`-separated word is singularized, so `blog_posts` becomes
/// `blog_post`. Uncountable words (`series`, `news`) come back unchanged.
pub fn singularize(word: &str) -> String {
    let (head, last) = match word.rfind('_') {
        Some(index) => word.split_at(index + 1),
        None => ("", word),
    };
    format!("{head}{}", singularize_word(last))
}

fn singularize_word(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }
    for (plural, singular) in ENDINGS {
        if let Some(stem) = word.strip_suffix(plural) {
            return format!("{stem}{singular}");
        }
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.ends_with(|c: char| !"aeiou".contains(c)) {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

/// Unqualified name of a type, without generic arguments.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// View directory for a controller type name: `Controller` suffix dropped,
/// snake_cased. `BlogPostsController` → `blog_posts`.
pub fn view_base(type_name: &str) -> String {
    type_name
        .strip_suffix("Controller")
        .unwrap_or(type_name)
        .to_case(Case::Snake)
}
