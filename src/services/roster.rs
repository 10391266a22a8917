// src/services/roster.rs

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        attendance::{AttendanceEntry, AttendanceRecord, StudentAttendance},
        result::{ResultEntry, ResultRecord, StudentResult},
    },
};

/// Uma linha da lista de alunos embutida num registro de turma.
pub trait RosterEntry {
    fn student_id(&self) -> Uuid;
}

/// Registro de turma (chamada ou notas) com uma linha por aluno.
pub trait Roster {
    type Entry: RosterEntry + Clone;
    type Projected;

    fn entries(&self) -> &[Self::Entry];

    /// Descarta a lista e mantém só a linha de um aluno.
    fn into_projection(self, entry: Self::Entry) -> Self::Projected;
}

/// Visão de um aluno sobre registros já filtrados por escola/turma.
///
/// Registros sem o aluno somem do resultado. A ordem de entrada é mantida.
/// Com IDs repetidos na lista vale a primeira linha; a escrita já rejeita
/// listas assim, mas registros antigos podem tê-las.
pub fn project_for_student<R: Roster>(records: Vec<R>, student_id: Uuid) -> Vec<R::Projected> {
    records
        .into_iter()
        .filter_map(|record| {
            let entry = record
                .entries()
                .iter()
                .find(|entry| entry.student_id() == student_id)
                .cloned()?;
            Some(record.into_projection(entry))
        })
        .collect()
}

pub fn ensure_unique_students<E: RosterEntry>(entries: &[E]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.student_id()) {
            return Err(AppError::DuplicateStudentInRoster(entry.student_id()));
        }
    }
    Ok(())
}

impl RosterEntry for AttendanceEntry {
    fn student_id(&self) -> Uuid {
        self.id
    }
}

impl RosterEntry for ResultEntry {
    fn student_id(&self) -> Uuid {
        self.id
    }
}

impl Roster for AttendanceRecord {
    type Entry = AttendanceEntry;
    type Projected = StudentAttendance;

    fn entries(&self) -> &[AttendanceEntry] {
        &self.students
    }

    fn into_projection(self, entry: AttendanceEntry) -> StudentAttendance {
        StudentAttendance {
            session: self.session,
            student_status: entry,
        }
    }
}

impl Roster for ResultRecord {
    type Entry = ResultEntry;
    type Projected = StudentResult;

    fn entries(&self) -> &[ResultEntry] {
        &self.students
    }

    fn into_projection(self, entry: ResultEntry) -> StudentResult {
        StudentResult {
            session: self.session,
            exam_type: self.exam_type,
            student_result: entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{attendance::AttendanceStatus, class_session::ClassSession};
    use chrono::{NaiveDate, Utc};

    fn session(day: u32) -> ClassSession {
        ClassSession {
            id: Uuid::new_v4(),
            school_id: Some(Uuid::new_v4()),
            class_name: "8".into(),
            section: "B".into(),
            subject: "Matemática".into(),
            teacher: "Carlos Lima".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn attendance(day: u32, students: &[(Uuid, AttendanceStatus)]) -> AttendanceRecord {
        AttendanceRecord {
            session: session(day),
            students: students
                .iter()
                .map(|(id, status)| AttendanceEntry {
                    id: *id,
                    name: format!("aluno-{id}"),
                    status: *status,
                })
                .collect(),
        }
    }

    #[test]
    fn keeps_only_records_with_the_student() {
        let ana = Uuid::new_v4();
        let bruno = Uuid::new_v4();
        let records = vec![
            attendance(12, &[(ana, AttendanceStatus::Present), (bruno, AttendanceStatus::Absent)]),
            attendance(11, &[(bruno, AttendanceStatus::Present)]),
            attendance(10, &[(ana, AttendanceStatus::Late)]),
        ];

        let projected = project_for_student(records, ana);

        assert_eq!(projected.len(), 2);
        assert!(projected.iter().all(|p| p.student_status.id == ana));
        // ordem de entrada preservada
        assert_eq!(projected[0].session.date.to_string(), "2024-03-12");
        assert_eq!(projected[0].student_status.status, AttendanceStatus::Present);
        assert_eq!(projected[1].student_status.status, AttendanceStatus::Late);
    }

    #[test]
    fn empty_input_or_absent_student_yields_nothing() {
        let ana = Uuid::new_v4();
        assert!(project_for_student(Vec::<AttendanceRecord>::new(), ana).is_empty());

        let records = vec![attendance(10, &[(Uuid::new_v4(), AttendanceStatus::Present)])];
        assert!(project_for_student(records, ana).is_empty());
    }

    #[test]
    fn first_entry_wins_on_duplicate_ids() {
        let ana = Uuid::new_v4();
        let records = vec![attendance(
            10,
            &[(ana, AttendanceStatus::Absent), (ana, AttendanceStatus::Present)],
        )];

        let projected = project_for_student(records, ana);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].student_status.status, AttendanceStatus::Absent);
    }

    #[test]
    fn result_projection_carries_exam_type() {
        let ana = Uuid::new_v4();
        let record = ResultRecord {
            session: session(5),
            exam_type: "Prova Bimestral".into(),
            students: vec![ResultEntry {
                id: ana,
                name: "Ana".into(),
                marks: "90".into(),
                grade: "A".into(),
            }],
        };

        let projected = project_for_student(vec![record], ana);
        assert_eq!(projected[0].exam_type, "Prova Bimestral");
        assert_eq!(projected[0].student_result.marks, "90");
    }

    #[test]
    fn duplicate_ids_are_rejected_on_write() {
        let ana = Uuid::new_v4();
        let record = attendance(
            10,
            &[(ana, AttendanceStatus::Present), (Uuid::new_v4(), AttendanceStatus::Absent)],
        );
        assert!(ensure_unique_students(&record.students).is_ok());

        let record = attendance(10, &[(ana, AttendanceStatus::Present), (ana, AttendanceStatus::Late)]);
        assert!(matches!(
            ensure_unique_students(&record.students),
            Err(AppError::DuplicateStudentInRoster(id)) if id == ana
        ));
    }
}
