//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - ハンドシェイク時のトークン検証と Connection Registry への登録
//!
//! ### なぜこのテストが必要か
//! - 認証されていない接続が Registry に入らないことを保証する
//! - 接続の Identity はハンドシェイク時に一度だけ決まる
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効なトークンでの接続
//! - 異常系：トークンなし、検証失敗

use std::sync::Arc;

use rollcall_shared::time::get_jst_timestamp;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{AuthError, ConnectionId, ConnectionIdFactory, Identity, Timestamp, TokenVerifier},
    infrastructure::registry::{ClientInfo, ConnectionRegistry},
};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    token_verifier: Arc<dyn TokenVerifier>,
    registry: Arc<ConnectionRegistry>,
}

impl ConnectClientUseCase {
    pub fn new(token_verifier: Arc<dyn TokenVerifier>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            token_verifier,
            registry,
        }
    }

    /// クライアント接続を実行
    ///
    /// # Arguments
    ///
    /// * `token` - ハンドシェイクで受け取ったトークン
    /// * `sender` - 接続の送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok((ConnectionId, Identity))` - 登録済みの接続
    /// * `Err(ConnectError)` - 認証失敗（Registry には登録されない）
    pub async fn execute(
        &self,
        token: Option<&str>,
        sender: UnboundedSender<String>,
    ) -> Result<(ConnectionId, Identity), ConnectError> {
        // 1. トークン検証
        let token = token.ok_or(AuthError::MissingToken)?;
        let identity = self.token_verifier.verify(token).await?;

        // 2. Registry に登録
        let connection_id = ConnectionIdFactory::generate();
        self.registry
            .register(
                connection_id,
                ClientInfo {
                    identity: identity.clone(),
                    sender,
                    connected_at: Timestamp::new(get_jst_timestamp()),
                },
            )
            .await;

        Ok((connection_id, identity))
    }
}
