//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态：会话注册表与页面控制器。

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::UiController;
use crate::session::Session;

/// 可共享的会话
pub type SharedSession = Arc<Mutex<Session>>;

/// 会话注册表
pub struct SessionRegistry {
    sessions: DashMap<String, SharedSession>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// 创建新会话；达到上限时淘汰最早创建的会话
    pub fn create(&self) -> SharedSession {
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().lock().created_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    self.sessions.remove(&id);
                    debug!("Evicted session: {}", id);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Mutex::new(Session::new(id.clone())));
        self.sessions.insert(id.clone(), Arc::clone(&session));
        info!("Session created: {} (active={})", id, self.sessions.len());
        session
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
pub struct AppState {
    pub sessions: SessionRegistry,
    pub controller: UiController,
}

impl AppState {
    pub fn new(controller: UiController) -> Self {
        Self {
            sessions: SessionRegistry::new(controller.config().max_sessions),
            controller,
        }
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(controller: UiController) -> Arc<AppState> {
    Arc::new(AppState::new(controller))
}
