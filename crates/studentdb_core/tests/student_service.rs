use std::cell::RefCell;
use std::rc::Rc;
use studentdb_core::{
    DbConfig, LoggingObserver, RepoError, RepoResult, SaveOutcome, SqliteStudentRepository,
    Student, StudentDto, StudentEvent, StudentId, StudentObserver, StudentRepository,
    StudentService,
};

fn open_service() -> StudentService<SqliteStudentRepository> {
    let repo = SqliteStudentRepository::open(DbConfig::in_memory()).unwrap();
    StudentService::new(repo)
}

#[derive(Clone, Default)]
struct RecordingObserver {
    events: Rc<RefCell<Vec<StudentEvent>>>,
}

impl StudentObserver for RecordingObserver {
    fn on_event(&self, event: &StudentEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[test]
fn list_all_is_empty_on_fresh_store() {
    let service = open_service();

    assert!(service.list_all().unwrap().is_empty());
    assert!(service.get_by_id(1).unwrap().is_none());
}

#[test]
fn create_writes_generated_id_back_to_dto() {
    let service = open_service();

    let mut dto = StudentDto::new("Erika", "Muster", "erika@example.com");
    let id = service.create(&mut dto).unwrap();

    assert_eq!(dto.id, Some(id));
    assert!(id > 0);

    let found = service.get_by_id(id).unwrap().unwrap();
    assert_eq!(found, dto);
}

#[test]
fn create_rejects_dto_that_already_has_an_id() {
    let service = open_service();

    let mut dto = StudentDto::with_id(4, "Max", "Mustermann", "max@example.com");
    let err = service.create(&mut dto).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyPersisted(4)));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn duplicate_email_fails_second_create() {
    let service = open_service();

    let mut first = StudentDto::new("Max", "Mustermann", "max@example.com");
    service.create(&mut first).unwrap();

    let mut second = StudentDto::new("Moritz", "Mustermann", "max@example.com");
    let err = service.create(&mut second).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateEmail(_)));
    assert_eq!(second.id, None);

    let matching = service
        .list_all()
        .unwrap()
        .into_iter()
        .filter(|student| student.email == "max@example.com")
        .count();
    assert_eq!(matching, 1);
}

#[test]
fn update_changes_only_mutated_fields() {
    let service = open_service();

    let mut dto = StudentDto::new("Ali", "Baddah", "ali@example.com");
    let id = service.create(&mut dto).unwrap();

    dto.first_name = "Ali (changed)".to_string();
    assert!(service.update(&dto).unwrap());

    let found = service.get_by_id(id).unwrap().unwrap();
    assert_eq!(found.first_name, "Ali (changed)");
    assert_eq!(found.last_name, "Baddah");
    assert_eq!(found.email, "ali@example.com");
}

#[test]
fn update_reports_missing_row_and_missing_id() {
    let service = open_service();

    let ghost = StudentDto::with_id(999, "Ghost", "Writer", "ghost@example.com");
    assert!(!service.update(&ghost).unwrap());

    let unsaved = StudentDto::new("New", "Person", "new@example.com");
    let err = service.update(&unsaved).unwrap_err();
    assert!(matches!(err, RepoError::MissingId));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn delete_returns_store_outcome() {
    let service = open_service();

    assert!(!service.delete(42).unwrap());

    let mut dto = StudentDto::new("Erika", "Muster", "erika@example.com");
    let id = service.create(&mut dto).unwrap();

    assert!(service.delete(id).unwrap());
    assert!(service.get_by_id(id).unwrap().is_none());
    assert!(!service.delete(id).unwrap());
}

#[test]
fn full_lifecycle_scenario() {
    let service = open_service();

    let mut dto = StudentDto::new("Max", "Mustermann", "max@example.com");
    let id = service.create(&mut dto).unwrap();
    assert_eq!(service.list_all().unwrap().len(), 1);

    let found = service.get_by_id(id).unwrap().unwrap();
    assert_eq!(found.first_name, "Max");
    assert_eq!(found.last_name, "Mustermann");
    assert_eq!(found.email, "max@example.com");

    assert!(service.delete(id).unwrap());
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn observer_sees_successful_mutations_only() {
    let observer = RecordingObserver::default();
    let events = Rc::clone(&observer.events);
    let service = open_service().with_observer(observer);

    let mut dto = StudentDto::new("Max", "Mustermann", "max@example.com");
    let id = service.create(&mut dto).unwrap();

    let mut duplicate = StudentDto::new("Other", "Person", "max@example.com");
    service.create(&mut duplicate).unwrap_err();

    dto.last_name = "Muster".to_string();
    service.update(&dto).unwrap();
    service
        .update(&StudentDto::with_id(id + 1, "No", "Body", "nobody@example.com"))
        .unwrap();

    service.delete(id).unwrap();
    service.delete(id).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            StudentEvent::Created { id },
            StudentEvent::Updated { id },
            StudentEvent::Deleted { id },
        ]
    );
}

#[test]
fn logging_observer_does_not_change_results() {
    let service = open_service().with_observer(LoggingObserver);

    let mut dto = StudentDto::new("Max", "Mustermann", "max@example.com");
    let id = service.create(&mut dto).unwrap();
    assert!(service.delete(id).unwrap());
}

/// Repository that answers every save with a fixed outcome.
struct FixedOutcomeRepository {
    outcome: SaveOutcome,
}

impl StudentRepository for FixedOutcomeRepository {
    fn ensure_schema(&self) -> RepoResult<()> {
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        Ok(Vec::new())
    }

    fn find_by_id(&self, _id: StudentId) -> RepoResult<Option<Student>> {
        Ok(None)
    }

    fn save(&self, _student: &mut Student) -> RepoResult<SaveOutcome> {
        Ok(self.outcome)
    }

    fn delete_by_id(&self, _id: StudentId) -> RepoResult<bool> {
        Ok(false)
    }
}

#[test]
fn mismatched_save_outcome_is_reported_as_such() {
    let service = StudentService::new(FixedOutcomeRepository {
        outcome: SaveOutcome::Updated,
    });
    let mut dto = StudentDto::new("Max", "Mustermann", "max@example.com");
    let err = service.create(&mut dto).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UnexpectedSaveOutcome(SaveOutcome::Updated)
    ));
    assert_eq!(dto.id, None);

    let service = StudentService::new(FixedOutcomeRepository {
        outcome: SaveOutcome::Inserted(9),
    });
    let existing = StudentDto::with_id(3, "Erika", "Muster", "erika@example.com");
    let err = service.update(&existing).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UnexpectedSaveOutcome(SaveOutcome::Inserted(9))
    ));
}
