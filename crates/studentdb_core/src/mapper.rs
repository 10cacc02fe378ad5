//! Pure conversions between `Student` and `StudentDto`.
//!
//! Every field is copied as-is; validation is the store's job.

use crate::model::student::{Student, StudentDto};

/// Converts a persistence record into its transfer shape.
pub fn to_dto(student: &Student) -> StudentDto {
    StudentDto {
        id: student.id,
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        email: student.email.clone(),
    }
}

/// Converts a transfer record into its persistence shape.
pub fn to_entity(dto: &StudentDto) -> Student {
    Student {
        id: dto.id,
        first_name: dto.first_name.clone(),
        last_name: dto.last_name.clone(),
        email: dto.email.clone(),
    }
}

impl From<Student> for StudentDto {
    fn from(value: Student) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

impl From<StudentDto> for Student {
    fn from(value: StudentDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{to_dto, to_entity};
    use crate::model::student::{Student, StudentDto};

    #[test]
    fn to_dto_copies_all_fields() {
        let student = Student::with_id(7, "Erika", "Muster", "erika@example.com");
        let dto = to_dto(&student);

        assert_eq!(dto.id, Some(7));
        assert_eq!(dto.first_name, "Erika");
        assert_eq!(dto.last_name, "Muster");
        assert_eq!(dto.email, "erika@example.com");
    }

    #[test]
    fn to_entity_keeps_missing_id() {
        let dto = StudentDto::new("Max", "Mustermann", "max@example.com");
        let student = to_entity(&dto);

        assert_eq!(student.id, None);
        assert_eq!(student.first_name, "Max");
        assert_eq!(student.last_name, "Mustermann");
        assert_eq!(student.email, "max@example.com");
    }

    #[test]
    fn owning_conversions_match_borrowing_ones() {
        let student = Student::with_id(3, "Ali", "Baddah", "ali@example.com");
        let dto = StudentDto::from(student.clone());
        assert_eq!(dto, to_dto(&student));
        assert_eq!(Student::from(dto), student);
    }
}
