use bson::Bson;
use campus_core::{
    collection::TypedCollection,
    document::Record,
    error::DocumentStoreResult,
    store::DocumentStore,
};

use crate::model::student::Student;

/// Persistence gateway for students.
///
/// Create, list and lookup over the `students` collection. Every write is
/// checked against the student schema before it reaches the store.
pub struct StudentService<'a> {
    students: TypedCollection<'a, Student>,
}

impl<'a> StudentService<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self {
            students: store.typed_collection::<Student>(),
        }
    }

    /// Persists a new student and returns it with its assigned identity.
    pub async fn create(&self, student: Student) -> DocumentStoreResult<Record<Student>> {
        let record = self.students.insert(student).await?;

        tracing::info!(id = %record.id, "Created student");

        Ok(record)
    }

    /// Persists a student from an untyped payload, validating it first.
    pub async fn create_from_document(&self, payload: Bson) -> DocumentStoreResult<Record<Student>> {
        let record = self.students.insert_raw(payload).await?;

        tracing::info!(id = %record.id, "Created student");

        Ok(record)
    }

    /// Returns every stored student. Order is whatever the store yields.
    pub async fn list_all(&self) -> DocumentStoreResult<Vec<Record<Student>>> {
        self.students.all().await
    }

    /// Looks a student up by the hex form of its identity.
    ///
    /// A well-formed but unknown identity is `Ok(None)`; a malformed one is an
    /// `InvalidIdentity` error.
    pub async fn get_by_id(&self, id: &str) -> DocumentStoreResult<Option<Record<Student>>> {
        self.students.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use campus_core::{
        backend::StoreBackendBuilder,
        error::DocumentStoreError,
        identity::Identity,
        store::DocumentStore,
    };
    use campus_memory::InMemoryStore;

    use crate::model::student::{ActiveStatus, Address, BloodGroup, Gender, fixtures::jane};

    async fn store() -> DocumentStore {
        DocumentStore::new(InMemoryStore::builder().build().await.unwrap())
    }

    async fn stored_count(store: &DocumentStore) -> usize {
        store
            .backend_as::<InMemoryStore>()
            .unwrap()
            .len("students")
            .await
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = store().await;
        let service = StudentService::new(&store);

        let created = service.create(jane()).await.unwrap();
        let found = service.get_by_id(&created.id.to_hex()).await.unwrap();

        assert_eq!(found, Some(created.clone()));
        assert_eq!(created.document, jane());
    }

    #[tokio::test]
    async fn fully_populated_student_round_trips() {
        let store = store().await;
        let service = StudentService::new(&store);

        let mut student = jane();
        student.name.middle_name = Some("Quinn".to_string());
        student.blood_group = Some(BloodGroup::AbNegative);
        student.address = Some(Address {
            city: Some("Dhaka".to_string()),
            state: None,
            country: Some("Bangladesh".to_string()),
        });
        student.profile_image = Some("https://example.com/jane.png".to_string());
        student.is_active = ActiveStatus::Blocked;

        let created = service.create(student.clone()).await.unwrap();
        let found = service
            .get_by_id(&created.id.to_hex())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.document, student);
    }

    #[tokio::test]
    async fn creates_get_distinct_identities() {
        let store = store().await;
        let service = StudentService::new(&store);

        let first = service.create(jane()).await.unwrap();
        let second = service.create(jane()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let store = store().await;

        assert!(StudentService::new(&store).list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_all_returns_every_created_student() {
        let store = store().await;
        let service = StudentService::new(&store);

        let mut expected = Vec::new();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            let mut student = jane();
            student.email = email.to_string();
            expected.push(service.create(student).await.unwrap());
        }

        let mut listed = service.list_all().await.unwrap();
        listed.sort_by_key(|record| record.id);
        expected.sort_by_key(|record| record.id);

        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn empty_required_field_is_rejected_without_writing() {
        let store = store().await;
        let service = StudentService::new(&store);

        let mut student = jane();
        student.guardian.mother_name = String::new();

        let err = service.create(student).await.unwrap_err();

        assert!(matches!(
            err,
            DocumentStoreError::Validation(ref v) if v.has_path("guardian.motherName")
        ));
        assert_eq!(stored_count(&store).await, 0);
    }

    #[tokio::test]
    async fn payload_outside_enumeration_is_rejected_without_writing() {
        let store = store().await;
        let service = StudentService::new(&store);

        let mut payload = jane_payload();
        payload.insert("gender", "other");
        payload.insert("isActive", "suspended");

        let err = service
            .create_from_document(Bson::Document(payload))
            .await
            .unwrap_err();

        let DocumentStoreError::Validation(v) = err else {
            panic!("expected a validation error");
        };
        assert!(v.has_path("gender"));
        assert!(v.has_path("isActive"));
        assert_eq!(stored_count(&store).await, 0);
    }

    #[tokio::test]
    async fn payload_round_trips_and_drops_unknown_fields() {
        let store = store().await;
        let service = StudentService::new(&store);

        let mut payload = jane_payload();
        payload.insert("nickname", "JD");

        let created = service
            .create_from_document(Bson::Document(payload))
            .await
            .unwrap();

        assert_eq!(created.document.gender, Gender::Female);
        assert_eq!(created.document.is_active, ActiveStatus::Active);
        assert_eq!(created.document, jane());
    }

    #[tokio::test]
    async fn unknown_identity_is_absent() {
        let store = store().await;
        let service = StudentService::new(&store);
        service.create(jane()).await.unwrap();

        let found = service
            .get_by_id(&Identity::generate().to_hex())
            .await
            .unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn malformed_identity_is_an_error() {
        let store = store().await;

        let err = StudentService::new(&store)
            .get_by_id("not-an-id")
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::InvalidIdentity(_)));
    }

    fn jane_payload() -> bson::Document {
        doc! {
            "name": { "firstName": "Jane", "lastName": "Doe" },
            "gender": "female",
            "email": "jane@x.com",
            "phone": "123",
            "department": "CSE",
            "academicSemester": "Spring2024",
            "guardian": {
                "fatherName": "John Doe",
                "fatherOccupation": "Engineer",
                "fatherContactNo": "555-0100",
                "motherName": "Mary Doe",
                "motherOccupation": "Teacher",
                "motherContactNo": "555-0101",
                "address": "1 Main St",
            },
            "localGuardian": {
                "name": "Ann Roe",
                "occupation": "Doctor",
                "contactNo": "555-0102",
                "address": "2 High St",
            },
            "isActive": "active",
        }
    }
}
