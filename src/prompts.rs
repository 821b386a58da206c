use rand::Rng;

/// Fixed question pool; `start_round` draws from it uniformly at random.
pub const QUESTION_POOL: &[&str] = &[
    "What is the meaning of life?",
    "Describe yourself in one sentence.",
    "If you could be an animal, what would you be?",
    "What is your favorite hobby and why?",
];

pub fn random_question() -> &'static str {
    let mut rng = rand::rng();
    QUESTION_POOL[rng.random_range(0..QUESTION_POOL.len())]
}
