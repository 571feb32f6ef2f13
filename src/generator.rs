//! Random sample data / 随机样本数据

use anyhow::Result;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::models::NewTravel;
use crate::store::RecordRepository;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Lowercase word of `len` letters drawn uniformly / 生成随机单词
pub fn random_word<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

pub fn generate_travel<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> NewTravel {
    let title = random_word(rng, config.word_length);
    let description = (0..config.words_per_description)
        .map(|_| random_word(rng, config.word_length))
        .collect::<Vec<_>>()
        .join(" ");

    NewTravel { title, description }
}

pub fn generate_batch(config: &GeneratorConfig) -> Vec<NewTravel> {
    let mut rng = rand::thread_rng();
    (0..config.batch_size)
        .map(|_| generate_travel(&mut rng, config))
        .collect()
}

/// Generate one batch and persist it atomically / 生成并写入一批数据
pub async fn populate(records: &dyn RecordRepository, config: &GeneratorConfig) -> Result<u64> {
    let batch = generate_batch(config);
    records.insert_batch(&batch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::store::SqliteRecordRepository;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_word(word: &str, len: usize) -> bool {
        word.len() == len && word.bytes().all(|b| b.is_ascii_lowercase())
    }

    #[test]
    fn test_random_word() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0, 1, 5, 12] {
            assert!(is_word(&random_word(&mut rng, len), len));
        }
    }

    #[test]
    fn test_default_batch_shape() {
        let config = GeneratorConfig::default();
        let batch = generate_batch(&config);
        assert_eq!(batch.len(), 5000);

        for travel in &batch {
            assert!(is_word(&travel.title, 5), "bad title {:?}", travel.title);
            let words: Vec<&str> = travel.description.split(' ').collect();
            assert_eq!(words.len(), 50);
            assert!(words.iter().all(|w| is_word(w, 5)));
        }
    }

    #[test]
    fn test_custom_shape() {
        let config = GeneratorConfig {
            batch_size: 3,
            word_length: 8,
            words_per_description: 2,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let travel = generate_travel(&mut rng, &config);
        assert!(is_word(&travel.title, 8));
        assert_eq!(travel.description.len(), 8 * 2 + 1);
        assert_eq!(generate_batch(&config).len(), 3);
    }

    #[tokio::test]
    async fn test_populate_persists_whole_batch() {
        let repo = SqliteRecordRepository::new(memory_pool().await);
        let config = GeneratorConfig {
            batch_size: 1200,
            ..GeneratorConfig::default()
        };
        assert_eq!(populate(&repo, &config).await.unwrap(), 1200);

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored.len(), 1200);
        assert!(stored.iter().all(|t| is_word(&t.title, 5)));
        assert!(repo.search_raw("1").await.unwrap().is_empty());
    }
}
