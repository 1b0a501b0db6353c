use std::collections::HashMap;

use crate::model::SongId;

/// A lookup from song id to a precomputed style label.
///
/// The recommender reads labels through this trait so that it stays
/// independent of how (or whether) styles were computed. The analysis
/// cache implements it, as does a plain map.
pub trait StyleLabels {
    fn style_of(&self, id: SongId) -> Option<&str>;
}

impl StyleLabels for HashMap<SongId, String> {
    fn style_of(&self, id: SongId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl<T: StyleLabels + ?Sized> StyleLabels for &T {
    fn style_of(&self, id: SongId) -> Option<&str> {
        (**self).style_of(id)
    }
}

/// A lookup that knows no labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlabeled;

impl StyleLabels for Unlabeled {
    fn style_of(&self, _id: SongId) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_labels() {
        let id = SongId::new();
        let mut labels = HashMap::new();
        labels.insert(id, "rock".to_string());
        assert_eq!(labels.style_of(id), Some("rock"));
        assert_eq!(labels.style_of(SongId::new()), None);
    }

    #[test]
    fn test_unlabeled() {
        assert_eq!(Unlabeled.style_of(SongId::new()), None);
    }
}
