/// Repository経由の操作で起こり得る失敗。
/// いずれも下位層のエラーをそのまま運ぶ（メッセージ・sourceとも変更しない）。
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Search(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// 元のエラー型への参照を返す。
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Search(e) | Self::Storage(e) => e.as_ref().downcast_ref::<E>(),
        }
    }
}
