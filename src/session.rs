//! 会话模块
//!
//! 把散落各处的 localStorage 读写收拢为一个 `SessionService`：
//! 显式的 get / set / clear，由调用方注入到各个界面。

use crate::error::StoreError;
use decorflow_shared::{Shop, keys};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 键值存储后端
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// 会话快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub selected_shop_id: Option<String>,
    pub selected_shop_name: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// 会话服务，唯一的会话状态所有者
#[derive(Debug, Clone)]
pub struct SessionService<S> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(keys::TOKEN).filter(|t| !t.is_empty())
    }

    pub fn load(&self) -> Session {
        Session {
            token: self.token(),
            selected_shop_id: self.store.get(keys::SELECTED_SHOP_ID),
            selected_shop_name: self.store.get(keys::SELECTED_SHOP_NAME),
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(keys::TOKEN, token)
    }

    /// 记录所选门店的 id 与名称
    ///
    /// 两个字段要么都写入，要么都不变：名称写入失败时恢复原来的 id。
    pub fn select_shop(&self, shop: &Shop) -> Result<(), StoreError> {
        let previous_id = self.store.get(keys::SELECTED_SHOP_ID);
        self.store.set(keys::SELECTED_SHOP_ID, &shop.id)?;

        if let Err(e) = self.store.set(keys::SELECTED_SHOP_NAME, &shop.shop_name) {
            let restored = match previous_id {
                Some(id) => self.store.set(keys::SELECTED_SHOP_ID, &id),
                None => self.store.delete(keys::SELECTED_SHOP_ID),
            };
            if let Err(rollback) = restored {
                log::warn!("failed to roll back `{}`: {}", keys::SELECTED_SHOP_ID, rollback);
            }
            return Err(e);
        }
        Ok(())
    }

    /// 清除全部会话字段（包括旧版本遗留的键）
    ///
    /// 即使某个键删除失败也会继续删除其余键，最后返回第一个错误。
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_err = None;
        for key in keys::ALL {
            if let Err(e) = self.store.delete(key) {
                log::warn!("failed to remove session key `{}`: {}", key, e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// =========================================================
// 内存存储
// =========================================================

/// 进程内存储，克隆后共享同一份数据
///
/// 用于原生环境和测试；浏览器中使用 localStorage 实现。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
