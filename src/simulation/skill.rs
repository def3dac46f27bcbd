use rand::Rng;
use rand::distr::Distribution;
use rand_distr::StandardNormal;

/// Distribution that player skills are drawn from.
///
/// Skills are normally distributed around `mean` and clamped into [0, 1],
/// so the bounds are slightly over represented.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for SkillDistribution {
    fn default() -> Self {
        Self {
            mean: 0.5,
            std_dev: 0.2,
        }
    }
}

impl SkillDistribution {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Draw a single skill in [0, 1].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        (self.mean + self.std_dev * z).clamp(0.0, 1.0)
    }

    /// Draw `count` independent skills.
    pub fn sample_n<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Skills for a table where seat 0 is the tracked player and every
    /// other seat is drawn fresh.
    pub fn table_with_subject<R: Rng + ?Sized>(
        &self,
        subject_skill: f64,
        player_count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        let mut skills = Vec::with_capacity(player_count);
        skills.push(subject_skill);
        skills.extend((1..player_count).map(|_| self.sample(rng)));
        skills
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_samples_are_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        // A wide distribution hits both bounds often.
        let wide = SkillDistribution::new(0.5, 5.0);
        let skills = wide.sample_n(1_000, &mut rng);
        assert!(skills.iter().all(|s| (0.0..=1.0).contains(s)));
        assert!(skills.iter().any(|s| *s == 0.0));
        assert!(skills.iter().any(|s| *s == 1.0));
    }

    #[test]
    fn test_default_centered() {
        let mut rng = StdRng::seed_from_u64(42);
        let skills = SkillDistribution::default().sample_n(20_000, &mut rng);
        let mean = skills.iter().sum::<f64>() / skills.len() as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean was {}", mean);
    }

    #[test]
    fn test_zero_std_dev_is_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let fixed = SkillDistribution::new(0.3, 0.0);
        assert!(fixed.sample_n(10, &mut rng).iter().all(|s| *s == 0.3));
    }

    #[test]
    fn test_table_with_subject() {
        let mut rng = StdRng::seed_from_u64(3);
        let skills = SkillDistribution::default().table_with_subject(0.9, 8, &mut rng);
        assert_eq!(skills.len(), 8);
        assert_eq!(skills[0], 0.9);
        assert!(skills[1..].iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
