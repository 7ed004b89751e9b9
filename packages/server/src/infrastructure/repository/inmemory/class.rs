//! InMemory Class Repository 実装
//!
//! クラスと在籍学生の読み取り専用ビュー。起動時にシードファイルから投入される。

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Class, ClassId, ClassRepository, RepositoryError, UserId};

/// インメモリ Class Repository 実装
#[derive(Default)]
pub struct InMemoryClassRepository {
    classes: RwLock<HashMap<ClassId, Class>>,
}

impl InMemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: impl IntoIterator<Item = Class>) -> Self {
        let classes = classes
            .into_iter()
            .map(|class| (class.id.clone(), class))
            .collect();
        Self {
            classes: RwLock::new(classes),
        }
    }

    /// Insert or replace a class.
    pub async fn upsert(&self, class: Class) {
        self.classes.write().await.insert(class.id.clone(), class);
    }

    pub async fn count(&self) -> usize {
        self.classes.read().await.len()
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn find_class_by_id(&self, class_id: &ClassId) -> Result<Option<Class>, RepositoryError> {
        Ok(self.classes.read().await.get(class_id).cloned())
    }

    async fn find_enrolled_students(
        &self,
        class_id: &ClassId,
    ) -> Result<BTreeSet<UserId>, RepositoryError> {
        self.classes
            .read()
            .await
            .get(class_id)
            .map(|class| class.student_ids.clone())
            .ok_or_else(|| RepositoryError::ClassNotFound(class_id.clone()))
    }
}
