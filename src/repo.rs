use async_trait::async_trait;

use crate::models::*;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("conflict")] Conflict,
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get_user(&self, id: Id) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, new: NewUser) -> RepoResult<User>;
}

#[async_trait]
pub trait PropertyRepo: Send + Sync {
    async fn list_properties(&self) -> Vec<Property>;
    async fn list_properties_by_type(&self, kind: PropertyType) -> Vec<Property>;
    async fn list_featured_properties(&self) -> Vec<Property>;
    async fn get_property(&self, id: Id) -> Option<Property>;
    async fn create_property(&self, new: NewProperty) -> Property;
    async fn update_property(&self, id: Id, upd: UpdateProperty) -> Option<Property>;
    async fn delete_property(&self, id: Id) -> bool;
}

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn list_blog_posts(&self) -> Vec<BlogPost>;
    async fn get_blog_post(&self, id: Id) -> Option<BlogPost>;
    async fn create_blog_post(&self, new: NewBlogPost) -> BlogPost;
    async fn update_blog_post(&self, id: Id, upd: UpdateBlogPost) -> Option<BlogPost>;
    async fn delete_blog_post(&self, id: Id) -> bool;
}

#[async_trait]
pub trait MessageRepo: Send + Sync {
    async fn list_messages(&self) -> Vec<Message>;
    async fn get_message(&self, id: Id) -> Option<Message>;
    async fn create_message(&self, new: NewMessage) -> Message;
    /// The only mutation a stored message accepts.
    async fn set_read_status(&self, id: Id, is_read: bool) -> Option<Message>;
    async fn delete_message(&self, id: Id) -> bool;
}

#[async_trait]
pub trait TestimonialRepo: Send + Sync {
    async fn list_testimonials(&self) -> Vec<Testimonial>;
    async fn get_testimonial(&self, id: Id) -> Option<Testimonial>;
    async fn create_testimonial(&self, new: NewTestimonial) -> Testimonial;
    async fn update_testimonial(&self, id: Id, upd: UpdateTestimonial) -> Option<Testimonial>;
    async fn delete_testimonial(&self, id: Id) -> bool;
}

pub trait Repo: UserRepo + PropertyRepo + BlogRepo + MessageRepo + TestimonialRepo {}

impl<T> Repo for T where T: UserRepo + PropertyRepo + BlogRepo + MessageRepo + TestimonialRepo {}

pub mod inmem {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

    /// One entity table with its own id counter. Ids only grow, so the
    /// BTreeMap iterates in insertion order.
    #[derive(Debug)]
    struct Table<T> {
        rows: BTreeMap<Id, T>,
        last_id: Id,
    }

    impl<T> Default for Table<T> {
        fn default() -> Self {
            Self { rows: BTreeMap::new(), last_id: 0 }
        }
    }

    impl<T: Clone> Table<T> {
        fn all(&self) -> Vec<T> {
            self.rows.values().cloned().collect()
        }

        fn filtered(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
            self.rows.values().filter(|r| pred(r)).cloned().collect()
        }

        fn get(&self, id: Id) -> Option<T> {
            self.rows.get(&id).cloned()
        }

        fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
            self.last_id += 1;
            let row = build(self.last_id);
            self.rows.insert(self.last_id, row.clone());
            row
        }

        fn modify(&mut self, id: Id, apply: impl FnOnce(&mut T)) -> Option<T> {
            let row = self.rows.get_mut(&id)?;
            apply(row);
            Some(row.clone())
        }

        fn remove(&mut self, id: Id) -> bool {
            self.rows.remove(&id).is_some()
        }
    }

    #[derive(Default)]
    struct State {
        users: Table<User>,
        properties: Table<Property>,
        blog_posts: Table<BlogPost>,
        messages: Table<Message>,
        testimonials: Table<Testimonial>,
    }

    /// Process-local store. Clones share the same tables; `new()` always
    /// starts empty.
    #[derive(Clone, Default)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
    }

    impl InMemRepo {
        pub fn new() -> Self {
            Self::default()
        }

        // Every mutation is a single map operation, so a panic elsewhere
        // cannot leave a table half-written.
        fn read(&self) -> RwLockReadGuard<'_, State> {
            self.state.read().unwrap_or_else(PoisonError::into_inner)
        }

        fn write(&self) -> RwLockWriteGuard<'_, State> {
            self.state.write().unwrap_or_else(PoisonError::into_inner)
        }
    }

    #[async_trait]
    impl UserRepo for InMemRepo {
        async fn get_user(&self, id: Id) -> Option<User> {
            self.read().users.get(id)
        }
        async fn get_user_by_username(&self, username: &str) -> Option<User> {
            self.read().users.rows.values().find(|u| u.username == username).cloned()
        }
        async fn create_user(&self, new: NewUser) -> RepoResult<User> {
            let mut s = self.write();
            if s.users.rows.values().any(|u| u.username == new.username) {
                return Err(RepoError::Conflict);
            }
            Ok(s.users.insert_with(|id| User { id, username: new.username, password_hash: new.password_hash }))
        }
    }

    #[async_trait]
    impl PropertyRepo for InMemRepo {
        async fn list_properties(&self) -> Vec<Property> {
            self.read().properties.all()
        }
        async fn list_properties_by_type(&self, kind: PropertyType) -> Vec<Property> {
            self.read().properties.filtered(|p| p.property_type == kind)
        }
        async fn list_featured_properties(&self) -> Vec<Property> {
            self.read().properties.filtered(|p| p.is_featured)
        }
        async fn get_property(&self, id: Id) -> Option<Property> {
            self.read().properties.get(id)
        }
        async fn create_property(&self, new: NewProperty) -> Property {
            let now = Utc::now();
            self.write().properties.insert_with(|id| Property {
                id,
                title: new.title,
                description: new.description,
                price: new.price,
                location: new.location,
                size: new.size,
                size_unit: new.size_unit,
                features: new.features,
                images: new.images,
                is_featured: new.is_featured,
                property_type: new.property_type,
                created_at: now,
            })
        }
        async fn update_property(&self, id: Id, upd: UpdateProperty) -> Option<Property> {
            self.write().properties.modify(id, |p| {
                if let Some(v) = upd.title { p.title = v; }
                if let Some(v) = upd.description { p.description = v; }
                if let Some(v) = upd.price { p.price = v; }
                if let Some(v) = upd.location { p.location = v; }
                if let Some(v) = upd.size { p.size = v; }
                if let Some(v) = upd.size_unit { p.size_unit = v; }
                if let Some(v) = upd.features { p.features = v; }
                if let Some(v) = upd.images { p.images = v; }
                if let Some(v) = upd.is_featured { p.is_featured = v; }
                if let Some(v) = upd.property_type { p.property_type = v; }
            })
        }
        async fn delete_property(&self, id: Id) -> bool {
            self.write().properties.remove(id)
        }
    }

    #[async_trait]
    impl BlogRepo for InMemRepo {
        async fn list_blog_posts(&self) -> Vec<BlogPost> {
            self.read().blog_posts.all()
        }
        async fn get_blog_post(&self, id: Id) -> Option<BlogPost> {
            self.read().blog_posts.get(id)
        }
        async fn create_blog_post(&self, new: NewBlogPost) -> BlogPost {
            let now = Utc::now();
            self.write().blog_posts.insert_with(|id| BlogPost {
                id,
                title: new.title,
                content: new.content,
                excerpt: new.excerpt,
                author: new.author,
                image: new.image,
                created_at: now,
            })
        }
        async fn update_blog_post(&self, id: Id, upd: UpdateBlogPost) -> Option<BlogPost> {
            self.write().blog_posts.modify(id, |b| {
                if let Some(v) = upd.title { b.title = v; }
                if let Some(v) = upd.content { b.content = v; }
                if let Some(v) = upd.excerpt { b.excerpt = v; }
                if let Some(v) = upd.author { b.author = v; }
                if let Some(v) = upd.image { b.image = v; }
            })
        }
        async fn delete_blog_post(&self, id: Id) -> bool {
            self.write().blog_posts.remove(id)
        }
    }

    #[async_trait]
    impl MessageRepo for InMemRepo {
        async fn list_messages(&self) -> Vec<Message> {
            self.read().messages.all()
        }
        async fn get_message(&self, id: Id) -> Option<Message> {
            self.read().messages.get(id)
        }
        async fn create_message(&self, new: NewMessage) -> Message {
            let now = Utc::now();
            self.write().messages.insert_with(|id| Message {
                id,
                name: new.name,
                email: new.email,
                phone: new.phone,
                interest: new.interest,
                message: new.message,
                is_read: false,
                created_at: now,
            })
        }
        async fn set_read_status(&self, id: Id, is_read: bool) -> Option<Message> {
            self.write().messages.modify(id, |m| m.is_read = is_read)
        }
        async fn delete_message(&self, id: Id) -> bool {
            self.write().messages.remove(id)
        }
    }

    #[async_trait]
    impl TestimonialRepo for InMemRepo {
        async fn list_testimonials(&self) -> Vec<Testimonial> {
            self.read().testimonials.all()
        }
        async fn get_testimonial(&self, id: Id) -> Option<Testimonial> {
            self.read().testimonials.get(id)
        }
        async fn create_testimonial(&self, new: NewTestimonial) -> Testimonial {
            self.write().testimonials.insert_with(|id| Testimonial {
                id,
                name: new.name,
                location: new.location,
                message: new.message,
                rating: new.rating,
                image: new.image,
            })
        }
        async fn update_testimonial(&self, id: Id, upd: UpdateTestimonial) -> Option<Testimonial> {
            self.write().testimonials.modify(id, |t| {
                if let Some(v) = upd.name { t.name = v; }
                if let Some(v) = upd.location { t.location = v; }
                if let Some(v) = upd.message { t.message = v; }
                if let Some(v) = upd.rating { t.rating = v; }
                if let Some(v) = upd.image { t.image = v; }
            })
        }
        async fn delete_testimonial(&self, id: Id) -> bool {
            self.write().testimonials.remove(id)
        }
    }
}
