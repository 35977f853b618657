//! Coin toss and dice roll

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use serde_json::{json, Value};

use super::tool::{Tool, ToolResult};
use crate::llm::{define_tool, ToolDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl std::fmt::Display for CoinFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoinFace::Heads => write!(f, "Heads"),
            CoinFace::Tails => write!(f, "Tails"),
        }
    }
}

pub fn toss_coin<R: Rng + ?Sized>(rng: &mut R) -> CoinFace {
    if rng.gen_bool(0.5) {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    }
}

/// Always in `1..=6`
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

pub struct CoinTossTool;

#[async_trait]
impl Tool for CoinTossTool {
    fn name(&self) -> &str {
        "coin_toss"
    }

    fn description(&self) -> &str {
        "Simulate tossing a coin."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(self.name(), self.description(), json!({}), &[])
    }

    async fn execute(&self, _input: &Value) -> Result<ToolResult> {
        let face = toss_coin(&mut rand::thread_rng());
        Ok(ToolResult::success(format!("It's {}!", face)))
    }
}

pub struct DiceRollTool;

#[async_trait]
impl Tool for DiceRollTool {
    fn name(&self) -> &str {
        "dice_roll"
    }

    fn description(&self) -> &str {
        "Simulate rolling a six-sided die."
    }

    fn definition(&self) -> ToolDefinition {
        define_tool(self.name(), self.description(), json!({}), &[])
    }

    async fn execute(&self, _input: &Value) -> Result<ToolResult> {
        let roll = roll_die(&mut rand::thread_rng());
        Ok(ToolResult::success(format!("You rolled a {} 🎲", roll)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_die_stays_in_range_and_covers_all_faces() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..1000 {
            let roll = roll_die(&mut rng);
            assert!((1..=6).contains(&roll));
            seen[(roll - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_coin_lands_on_both_faces() {
        let mut rng = StdRng::seed_from_u64(1);
        let faces: Vec<CoinFace> = (0..100).map(|_| toss_coin(&mut rng)).collect();
        assert!(faces.contains(&CoinFace::Heads));
        assert!(faces.contains(&CoinFace::Tails));
    }

    #[tokio::test]
    async fn test_coin_toss_output() {
        for _ in 0..20 {
            let result = CoinTossTool.execute(&json!({})).await.unwrap();
            assert!(
                result.output == "It's Heads!" || result.output == "It's Tails!",
                "unexpected output {}",
                result.output
            );
        }
    }

    #[tokio::test]
    async fn test_dice_roll_output() {
        for _ in 0..20 {
            let result = DiceRollTool.execute(&json!({})).await.unwrap();
            let n: u8 = result
                .output
                .strip_prefix("You rolled a ")
                .and_then(|s| s.strip_suffix(" 🎲"))
                .and_then(|s| s.parse().ok())
                .expect("dice output");
            assert!((1..=6).contains(&n));
        }
    }
}
