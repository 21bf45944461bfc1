use serde::{Deserialize, Serialize};

/// Улица раздачи (раунд ставок).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Следующая улица, None после ривера.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Сколько общих карт открыто к началу этой улицы.
    pub fn visible_board_cards(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// Фаза стола в цикле раздачи.
///
/// Idle → Betting(PreFlop) → RoundComplete → Betting(Flop) → … → HandComplete → Betting(PreFlop) …
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HandPhase {
    /// Меньше двух игроков, раздача не идёт.
    #[default]
    Idle,
    /// Идёт раунд ставок, ждём действие от current_player.
    Betting(Street),
    /// Раунд ставок закрыт, ждём таймер до следующей улицы/шоудауна.
    RoundComplete(Street),
    /// Банк разыгран, ждём таймер до следующей раздачи.
    HandComplete,
}

impl HandPhase {
    pub fn hand_in_progress(self) -> bool {
        !matches!(self, HandPhase::Idle)
    }
}

/// Рейтинг руки: категория и кикеры в одном числе (по основанию 16).
/// Кодирование/декодирование: в `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(pub u32);

impl Rating {
    /// Рейтинг сфолдившего/неактивного места: проигрывает всем.
    pub const NONE: Rating = Rating(0);
}
