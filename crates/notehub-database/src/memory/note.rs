//! In-memory note store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use notehub_core::result::AppResult;
use notehub_entity::note::{CreateNote, Note, UpdateNote};

use crate::store::NoteStore;

/// Note store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryNoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            title: data.title.clone(),
            content: data.content.clone(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.owner_id == owner_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn list_all(&self) -> AppResult<Vec<Note>> {
        let mut notes: Vec<Note> = self.notes.read().await.values().cloned().collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn update(&self, id: Uuid, data: &UpdateNote) -> AppResult<Option<Note>> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &data.title {
            note.title = title.clone();
        }
        if let Some(content) = &data.content {
            note.content = content.clone();
        }
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.notes.write().await.remove(&id).is_some())
    }
}
