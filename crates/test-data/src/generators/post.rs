//! Bulletin board post generation.

use fake::{
    Fake,
    faker::{
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
};
use rand::Rng;

/// Generated post, with its plaintext password so it can be deleted later.
#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub password: String,
}

/// Configuration for post generation.
#[derive(Debug, Clone)]
pub struct PostGenConfig {
    /// Probability that the author left a name.
    pub named_rate: f64,
    /// Probability that the post has a title.
    pub titled_rate: f64,
    /// Password given to every generated post.
    pub password: String,
}

impl Default for PostGenConfig {
    fn default() -> Self {
        Self {
            named_rate: 0.8,
            titled_rate: 0.9,
            password: "1234".to_string(),
        }
    }
}

/// Generates bulletin board posts.
pub struct PostGenerator {
    config: PostGenConfig,
}

impl PostGenerator {
    pub fn new() -> Self {
        Self {
            config: PostGenConfig::default(),
        }
    }

    pub fn with_config(config: PostGenConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedPost {
        let user_name = rng.gen_bool(self.config.named_rate).then(|| {
            let name: String = Name().fake_with_rng(rng);
            truncate(name, 30)
        });
        let title = rng.gen_bool(self.config.titled_rate).then(|| {
            let title: String = Sentence(3..8).fake_with_rng(rng);
            truncate(title, 100)
        });
        let content: String = Paragraph(1..4).fake_with_rng(rng);

        GeneratedPost {
            user_name,
            title,
            content: truncate(content, 2000),
            password: self.config.password.clone(),
        }
    }

    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedPost> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for PostGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts a string to at most `max` characters.
fn truncate(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}
