//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断済みの接続がブロードキャスト対象から外れることを保証する
//! - 既にブロードキャスト時に除去された接続の切断でも失敗しない
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済み接続の切断
//! - エッジケース：未登録（除去済み）の接続の切断

use std::sync::Arc;

use crate::{domain::ConnectionId, infrastructure::registry::ConnectionRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    registry: Arc<ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// クライアント切断を実行
    ///
    /// # Returns
    ///
    /// 接続がまだ登録されていた場合は `true`
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.registry.unregister(connection_id).await;
        if !removed {
            tracing::debug!(%connection_id, "connection already pruned");
        }
        removed
    }
}
