//! Generated user payloads

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use restprobe_common::{Gender, UserPayload, UserStatus};

const FIRST_NAMES: [&str; 26] = [
    "Aarav", "Amelia", "Bianca", "Chidi", "Dmitri", "Elena", "Farah", "Gustavo", "Hana",
    "Ingrid", "Jonas", "Keiko", "Liam", "Maya", "Nikhil", "Olga", "Priya", "Quentin", "Rosa",
    "Samir", "Tamsin", "Umar", "Valentina", "Wei", "Yusuf", "Zara",
];

const LAST_NAMES: [&str; 25] = [
    "Adeyemi", "Bergstrom", "Castillo", "Deshpande", "Eriksen", "Fontaine", "Gallagher",
    "Hoffmann", "Iyer", "Jankowski", "Kowalczyk", "Lindqvist", "Moreau", "Nakamura",
    "Okafor", "Petrov", "Quiroga", "Ramirez", "Schultz", "Tanaka", "Underwood", "Vasquez",
    "Whitfield", "Yamamoto", "Zielinski",
];

const EMAIL_DOMAINS: [&str; 4] = ["example.com", "example.net", "example.org", "mail.test"];

/// Source of user payloads for create and update calls
pub trait UserSource: Send + Sync {
    fn next_user(&mut self) -> UserPayload;
}

/// Random names, emails and enum values
pub struct RandomUsers {
    rng: StdRng,
}

impl RandomUsers {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<T: Copy, const N: usize>(&mut self, items: &[T; N]) -> T {
        items[self.rng.gen_range(0..N)]
    }
}

impl Default for RandomUsers {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSource for RandomUsers {
    fn next_user(&mut self) -> UserPayload {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        // GoRest rejects duplicate emails, so add a wide random suffix
        let suffix: u32 = self.rng.gen_range(10_000..100_000_000);

        UserPayload {
            name: format!("{first} {last}"),
            gender: self.pick(&Gender::ALL),
            email: format!(
                "{}.{}.{suffix}@{domain}",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            status: self.pick(&UserStatus::ALL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_covers_every_item() {
        let mut users = RandomUsers::seeded(3);
        let picks: Vec<&str> = (0..200).map(|_| users.pick(&EMAIL_DOMAINS)).collect();
        for domain in EMAIL_DOMAINS {
            assert!(picks.contains(&domain));
        }
    }

    #[test]
    fn test_generated_user_is_plausible() {
        let mut users = RandomUsers::seeded(7);
        for _ in 0..50 {
            let user = users.next_user();
            assert_eq!(user.name.split(' ').count(), 2);

            let (local, domain) = user.email.split_once('@').expect("email has @");
            assert!(!local.is_empty());
            assert!(EMAIL_DOMAINS.contains(&domain));
            assert!(!user.email.contains(' '));
        }
    }

    #[test]
    fn test_seeded_sequence_repeats() {
        let a: Vec<_> = (0..5).map({
            let mut users = RandomUsers::seeded(42);
            move |_| users.next_user()
        }).collect();
        let b: Vec<_> = (0..5).map({
            let mut users = RandomUsers::seeded(42);
            move |_| users.next_user()
        }).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_both_enum_values_show_up() {
        let mut users = RandomUsers::seeded(1);
        let batch: Vec<_> = (0..200).map(|_| users.next_user()).collect();
        for gender in Gender::ALL {
            assert!(batch.iter().any(|u| u.gender == gender));
        }
        for status in UserStatus::ALL {
            assert!(batch.iter().any(|u| u.status == status));
        }
    }
}
