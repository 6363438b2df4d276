//! The Student aggregate and its embedded sub-records.
//!
//! Wire and storage names are camelCase. Enumerated fields are closed enums
//! here, and the schema repeats their literal sets so raw payloads are checked
//! before they ever become a `Student`.

use campus_core::{
    document::Document,
    schema::{FieldKind, FieldSpec, Schema},
};
use serde::{Deserialize, Serialize};

pub const GENDERS: &[&str] = &["male", "female"];
pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
pub const ACTIVE_STATUSES: &[&str] = &["active", "blocked"];

static NAME_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("firstName", FieldKind::String),
        FieldSpec::optional("middleName", FieldKind::String),
        FieldSpec::required("lastName", FieldKind::String),
    ],
};

static GUARDIAN_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("fatherName", FieldKind::String),
        FieldSpec::required("fatherOccupation", FieldKind::String),
        FieldSpec::required("fatherContactNo", FieldKind::String),
        FieldSpec::required("motherName", FieldKind::String),
        FieldSpec::required("motherOccupation", FieldKind::String),
        FieldSpec::required("motherContactNo", FieldKind::String),
        FieldSpec::required("address", FieldKind::String),
    ],
};

static LOCAL_GUARDIAN_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("occupation", FieldKind::String),
        FieldSpec::required("contactNo", FieldKind::String),
        FieldSpec::required("address", FieldKind::String),
    ],
};

static ADDRESS_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::optional("city", FieldKind::String),
        FieldSpec::optional("state", FieldKind::String),
        FieldSpec::optional("country", FieldKind::String),
    ],
};

pub static STUDENT_SCHEMA: Schema = Schema {
    fields: &[
        FieldSpec::required("name", FieldKind::Embedded(&NAME_SCHEMA)),
        FieldSpec::required("gender", FieldKind::Enum(GENDERS)),
        FieldSpec::optional("bloodGroup", FieldKind::Enum(BLOOD_GROUPS)),
        FieldSpec::required("email", FieldKind::String),
        FieldSpec::required("phone", FieldKind::String),
        FieldSpec::optional("address", FieldKind::Embedded(&ADDRESS_SCHEMA)),
        FieldSpec::required("department", FieldKind::String),
        FieldSpec::required("academicSemester", FieldKind::String),
        FieldSpec::required("guardian", FieldKind::Embedded(&GUARDIAN_SCHEMA)),
        FieldSpec::required("localGuardian", FieldKind::Embedded(&LOCAL_GUARDIAN_SCHEMA)),
        FieldSpec::optional("profileImage", FieldKind::String),
        FieldSpec::required("isActive", FieldKind::Enum(ACTIVE_STATUSES)),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub father_name: String,
    pub father_occupation: String,
    pub father_contact_no: String,
    pub mother_name: String,
    pub mother_occupation: String,
    pub mother_contact_no: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalGuardian {
    pub name: String,
    pub occupation: String,
    pub contact_no: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

/// Whether the student's account is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveStatus {
    Active,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: Name,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub department: String,
    pub academic_semester: String,
    pub guardian: Guardian,
    pub local_guardian: LocalGuardian,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub is_active: ActiveStatus,
}

impl Document for Student {
    fn collection_name() -> &'static str {
        "students"
    }

    fn schema() -> &'static Schema {
        &STUDENT_SCHEMA
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::jane, *};
    use campus_core::document::DocumentExt;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_names() {
        let value = jane().to_json().unwrap();

        assert_eq!(value["name"]["firstName"], "Jane");
        assert_eq!(value["academicSemester"], "Spring2024");
        assert_eq!(value["localGuardian"]["contactNo"], "555-0102");
        assert_eq!(value["isActive"], "active");
        assert!(value.get("bloodGroup").is_none());
        assert!(value["name"].get("middleName").is_none());
    }

    #[test]
    fn enum_literals_match_schema_sets() {
        let genders = [Gender::Male, Gender::Female].map(|g| json!(g));
        let statuses = [ActiveStatus::Active, ActiveStatus::Blocked].map(|s| json!(s));
        let groups = [
            BloodGroup::APositive,
            BloodGroup::ANegative,
            BloodGroup::BPositive,
            BloodGroup::BNegative,
            BloodGroup::AbPositive,
            BloodGroup::AbNegative,
            BloodGroup::OPositive,
            BloodGroup::ONegative,
        ]
        .map(|b| json!(b));

        assert_eq!(genders.to_vec(), GENDERS.iter().map(|g| json!(g)).collect::<Vec<_>>());
        assert_eq!(statuses.to_vec(), ACTIVE_STATUSES.iter().map(|s| json!(s)).collect::<Vec<_>>());
        assert_eq!(groups.to_vec(), BLOOD_GROUPS.iter().map(|b| json!(b)).collect::<Vec<_>>());
    }

    #[test]
    fn full_student_satisfies_schema() {
        let mut student = jane();
        student.name.middle_name = Some("Q".to_string());
        student.blood_group = Some(BloodGroup::AbNegative);
        student.address = Some(Address {
            city: Some("Dhaka".to_string()),
            state: None,
            country: Some("Bangladesh".to_string()),
        });
        student.profile_image = Some("https://example.com/jane.png".to_string());

        assert!(STUDENT_SCHEMA.validate(&student.to_bson().unwrap()).is_ok());
    }

    #[test]
    fn schema_flags_nested_required_fields() {
        let mut student = jane().to_bson().unwrap();
        student
            .as_document_mut()
            .unwrap()
            .get_document_mut("guardian")
            .unwrap()
            .remove("motherName");

        let err = STUDENT_SCHEMA.validate(&student).unwrap_err();

        assert!(err.has_path("guardian.motherName"));
    }

    #[test]
    fn parses_wire_payload() {
        let student = Student::from_json(json!({
            "name": { "firstName": "Jane", "lastName": "Doe" },
            "gender": "female",
            "bloodGroup": "O+",
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
                "address": "1 Main St"
            },
            "localGuardian": {
                "name": "Ann Roe",
                "occupation": "Doctor",
                "contactNo": "555-0102",
                "address": "2 High St"
            },
            "isActive": "blocked"
        }))
        .unwrap();

        assert_eq!(student.blood_group, Some(BloodGroup::OPositive));
        assert_eq!(student.is_active, ActiveStatus::Blocked);
        assert_eq!(student.address, None);
    }
}
