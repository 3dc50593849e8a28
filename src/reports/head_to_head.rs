use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::display_names;
use crate::domain::{player_key, Match};

/// Record between two opponents; `first` sorts before `second` by key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub first: String,
    pub second: String,
    pub first_wins: u32,
    pub second_wins: u32,
    pub matches: u32,
}

impl HeadToHead {
    /// "a (x) x (y) b"
    pub fn display(&self) -> String {
        format!(
            "{} ({}) x ({}) {}",
            self.first, self.first_wins, self.second_wins, self.second
        )
    }

    pub fn difference(&self) -> u32 {
        self.first_wins.abs_diff(self.second_wins)
    }
}

/// Every pair of players that met on opposite teams
pub fn head_to_head(matches: &[Match]) -> Vec<HeadToHead> {
    let names = display_names(matches);
    let mut stats: BTreeMap<(String, String), HeadToHead> = BTreeMap::new();

    for m in matches {
        for (i, team) in m.teams.iter().enumerate() {
            for opponent_team in &m.teams[i + 1..] {
                for a in &team.players {
                    for b in &opponent_team.players {
                        let (ka, kb) = (player_key(a), player_key(b));
                        if ka == kb {
                            continue;
                        }
                        let (first, second) = if ka < kb { (ka, kb) } else { (kb, ka) };

                        let entry = stats
                            .entry((first.clone(), second.clone()))
                            .or_insert_with(|| HeadToHead {
                                first: names[&first].clone(),
                                second: names[&second].clone(),
                                first_wins: 0,
                                second_wins: 0,
                                matches: 0,
                            });
                        entry.matches += 1;
                        if m.is_winner(&first) {
                            entry.first_wins += 1;
                        }
                        if m.is_winner(&second) {
                            entry.second_wins += 1;
                        }
                    }
                }
            }
        }
    }

    stats.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_difference() {
        let record = HeadToHead {
            first: "Kant".to_string(),
            second: "RK".to_string(),
            first_wins: 1,
            second_wins: 4,
            matches: 5,
        };
        assert_eq!(record.display(), "Kant (1) x (4) RK");
        assert_eq!(record.difference(), 3);
    }
}
