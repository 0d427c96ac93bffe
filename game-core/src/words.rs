use std::collections::{HashMap, VecDeque};

/// Static per-topic, per-length word tables. Used whenever the external
/// generator is unavailable or returns something unusable, so every topic
/// must always be able to produce a word.
const ANIMALS: [&[&str]; 3] = [
    &["CAT", "DOG", "BAT", "RAT", "COW", "PIG", "FOX", "BEE", "ANT", "OWL"],
    &["BEAR", "LION", "WOLF", "DEER", "FISH", "BIRD", "FROG", "GOAT", "DUCK", "SWAN"],
    &["TIGER", "EAGLE", "SHARK", "WHALE", "PANDA", "KOALA", "ZEBRA", "HORSE", "SHEEP", "MOUSE"],
];

const FOOD: [&[&str]; 3] = [
    &["PIE", "TEA", "HAM", "JAM", "BUN", "EGG", "OAT", "NUT", "FIG", "YAM"],
    &["MEAT", "FISH", "RICE", "MILK", "SALT", "SOUP", "CAKE", "TACO", "PEAR", "PLUM"],
    &["PIZZA", "PASTA", "SALAD", "STEAK", "BREAD", "APPLE", "LEMON", "MANGO", "PEACH", "MELON"],
];

const SPORTS: [&[&str]; 3] = [
    &["RUN", "BOX", "SKI", "ROW", "JOG", "GYM", "WIN", "TIE", "BAT", "NET"],
    &["GOLF", "YOGA", "SURF", "DIVE", "RACE", "JUMP", "SWIM", "KICK", "BALL", "PUNT"],
    &["RUGBY", "RELAY", "CHESS", "DARTS", "SKATE", "CYCLE", "FENCE", "SCORE", "TRACK", "COACH"],
];

const TECHNOLOGY: [&[&str]; 3] = [
    &["CPU", "RAM", "USB", "APP", "WEB", "NET"],
    &["CODE", "DATA", "FILE", "LINK", "BLOG", "WIFI", "BYTE", "CHIP", "PORT", "DISK"],
    &["MOUSE", "CABLE", "PIXEL", "CLOUD", "EMAIL", "LOGIN", "VIRUS", "PROXY", "CACHE", "LINUX"],
];

const NATURE: [&[&str]; 3] = [
    &["SKY", "SUN", "SEA", "OAK", "DEW", "FOG", "MUD", "BAY", "DAM", "IVY"],
    &["TREE", "LEAF", "ROOT", "SEED", "SOIL", "MOSS", "WEED", "PINE", "FERN", "VINE"],
    &["GRASS", "PLANT", "RIVER", "OCEAN", "MOUNT", "STONE", "CLOUD", "STORM", "FLORA", "FAUNA"],
];

const SPACE: [&[&str]; 3] = [
    &["SUN", "ORB", "RAY", "SKY", "UFO", "ION", "GAS", "RED", "DIM", "HOT"],
    &["MOON", "STAR", "MARS", "VOID", "NOVA", "TAIL", "RING", "DUST", "BEAM", "HALO"],
    &["EARTH", "VENUS", "PLUTO", "COMET", "ORBIT", "QUARK", "BLACK", "SPACE", "TITAN", "LUNAR"],
];

const MUSIC: [&[&str]; 3] = [
    &["RAP", "POP", "HIP", "DUO", "BAR", "KEY", "BOP", "HIT", "JAM", "SKA"],
    &["SONG", "BEAT", "NOTE", "TUNE", "BASS", "DRUM", "JAZZ", "ROCK", "FUNK", "SOLO"],
    &["PIANO", "OPERA", "CHOIR", "VOCAL", "TRACK", "ALBUM", "TEMPO", "SCALE", "CHORD", "MUSIC"],
];

const MOVIES: [&[&str]; 3] = [
    &["ACT", "SET", "CUT", "DVD", "CGI", "VFX", "RUN", "HIT", "BIO", "WAR"],
    &["FILM", "HERO", "PLOT", "ROLE", "CAST", "SHOT", "CLIP", "REEL", "TAKE", "ZOOM"],
    &["ACTOR", "DRAMA", "SCENE", "GENRE", "CAMEO", "TITLE", "FRAME", "AWARD", "DEBUT", "STAGE"],
];

const SCIENCE: [&[&str]; 3] = [
    &["DNA", "ION", "LAB", "RAY", "GAS", "ORE", "WAX", "OIL", "AIR", "ICE"],
    &["ATOM", "CELL", "GENE", "TEST", "ACID", "BASE", "SALT", "BOND", "MASS", "VOLT"],
    &["LASER", "FORCE", "SPEED", "QUARK", "OZONE", "VIRUS", "GENES", "SOLAR", "PRISM", "ATOMS"],
];

const TRAVEL: [&[&str]; 3] = [
    &["JET", "BUS", "CAR", "MAP", "BAG", "VAN", "SKY", "SEA", "BAY", "ZIP"],
    &["TRIP", "TOUR", "VISA", "TAXI", "ROAD", "SHIP", "PORT", "CITY", "ISLE", "LANE"],
    &["TRAIN", "HOTEL", "BEACH", "PLANE", "FERRY", "COAST", "ROUTE", "PILOT", "CABIN", "TRAIL"],
];

fn topic_table(topic: &str) -> &'static [&'static [&'static str]; 3] {
    match topic {
        "animals" => &ANIMALS,
        "food" => &FOOD,
        "sports" => &SPORTS,
        "technology" => &TECHNOLOGY,
        "nature" => &NATURE,
        "space" => &SPACE,
        "music" => &MUSIC,
        "movies" => &MOVIES,
        "science" => &SCIENCE,
        "travel" => &TRAVEL,
        // Unknown topics play as animals rather than failing the request.
        _ => &ANIMALS,
    }
}

/// All fallback words for a topic and length. Lengths without a dedicated
/// list reuse the 3-letter one.
pub fn fallback_words(topic: &str, length: usize) -> &'static [&'static str] {
    let table = topic_table(topic);
    match length {
        3 => table[0],
        4 => table[1],
        5 => table[2],
        _ => table[0],
    }
}

/// One random fallback word.
pub fn fallback_word(topic: &str, length: usize) -> String {
    let words = fallback_words(topic, length);
    words[fastrand::usize(..words.len())].to_string()
}

/// Up to `count` distinct fallback words, for refilling the cache.
pub fn fallback_batch(topic: &str, length: usize, count: usize) -> Vec<String> {
    let mut words: Vec<String> = fallback_words(topic, length)
        .iter()
        .map(|w| w.to_string())
        .collect();
    fastrand::shuffle(&mut words);
    words.truncate(count);
    words
}

/// Example words fed into the generation prompt to steer the model.
pub fn prompt_examples(topic: &str, length: usize) -> String {
    fallback_words(topic, length).join(", ")
}

/// Whether generator output is acceptable as a secret word: purely
/// alphabetic and exactly the requested length.
pub fn is_usable_word(candidate: &str, length: usize) -> bool {
    let word = candidate.trim();
    !word.is_empty()
        && word.chars().count() == length
        && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Pre-generated words keyed by (topic, length). Words are popped on use so
/// a player does not see the same word twice in a row of sessions.
#[derive(Debug, Default)]
pub struct WordCache {
    entries: HashMap<(String, usize), VecDeque<String>>,
}

impl WordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&self, topic: &str, length: usize) -> usize {
        self.entries
            .get(&(topic.to_string(), length))
            .map_or(0, VecDeque::len)
    }

    pub fn pop(&mut self, topic: &str, length: usize) -> Option<String> {
        self.entries
            .get_mut(&(topic.to_string(), length))
            .and_then(VecDeque::pop_front)
    }

    pub fn extend<I>(&mut self, topic: &str, length: usize, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries
            .entry((topic.to_string(), length))
            .or_default()
            .extend(words);
    }
}
