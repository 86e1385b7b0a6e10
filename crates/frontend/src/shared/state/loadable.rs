use crate::shared::errors::FetchError;

/// Состояние асинхронно загружаемого ресурса
///
/// `Unloaded -> Loading -> Loaded | Failed`, and `Failed -> Loading` again when the
/// user retries.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T, E = FetchError> {
    Unloaded,
    Loading,
    Loaded(T),
    Failed(E),
}

impl<T, E> Default for Loadable<T, E> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<T, E> Loadable<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Loadable<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => Self::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_maps_to_terminal_states() {
        let ok: Loadable<Vec<u8>> = Ok(vec![1]).into();
        assert_eq!(ok.loaded(), Some(&vec![1]));
        assert!(ok.error().is_none());

        let failed: Loadable<Vec<u8>> = Err(FetchError::Status(500)).into();
        assert_eq!(failed.error(), Some(&FetchError::Status(500)));
        assert!(failed.loaded().is_none());
        assert!(!failed.is_loading());
    }
}
