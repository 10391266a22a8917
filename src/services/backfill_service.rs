// src/services/backfill_service.rs

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::result::{BackfillCandidate, BackfillReport},
};

/// Reconciliação de notas antigas sem `school_id`.
///
/// Uma nota só é atribuída à escola se TODOS os alunos da lista pertencem a
/// ela. Notas com alunos de escolas diferentes, alunos que não existem mais ou
/// lista vazia ficam como estão, para revisão manual. Linhas sem `id` legível
/// também impedem a atribuição.
#[derive(Clone)]
pub struct BackfillService {
    store: Arc<dyn RecordStore>,
}

impl BackfillService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn backfill_school_ids(
        &self,
        acting_school_id: Uuid,
        dry_run: bool,
    ) -> Result<BackfillReport, AppError> {
        if acting_school_id.is_nil() {
            return Err(AppError::MissingTenantContext);
        }

        // 1. Candidatas
        let candidates = self.store.find_results_without_school().await?;
        if candidates.is_empty() {
            tracing::info!(school_id = %acting_school_id, "Nenhuma nota sem escola para reconciliar");
            return Ok(BackfillReport {
                matched: 0,
                updated: 0,
                candidates: 0,
                dry_run,
            });
        }

        // 2. Alunos referenciados (sem repetição)
        let referenced: Vec<Uuid> = candidates
            .iter()
            .flat_map(|candidate| candidate.student_ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // 3. Dono de cada aluno, numa consulta só
        let owners: HashMap<Uuid, Uuid> = if referenced.is_empty() {
            HashMap::new()
        } else {
            self.store
                .find_student_schools(&referenced)
                .await?
                .into_iter()
                .map(|owner| (owner.id, owner.school_id))
                .collect()
        };

        // 4. Decisão por unanimidade
        let matched_ids = unanimous_matches(&candidates, &owners, acting_school_id);

        // 5. Escrita em lote (sem rollback compensatório)
        let updated = if dry_run || matched_ids.is_empty() {
            0
        } else {
            self.store
                .assign_results_to_school(&matched_ids, acting_school_id)
                .await?
        };

        let report = BackfillReport {
            matched: matched_ids.len() as u64,
            updated,
            candidates: candidates.len() as u64,
            dry_run,
        };

        tracing::info!(
            school_id = %acting_school_id,
            candidates = report.candidates,
            matched = report.matched,
            updated = report.updated,
            dry_run,
            "Reconciliação de school_id concluída"
        );
        if report.updated < report.matched && !dry_run {
            tracing::warn!(
                school_id = %acting_school_id,
                "Parte das notas não foi atualizada (provavelmente já reconciliada por outra execução)"
            );
        }

        Ok(report)
    }
}

/// IDs das notas cuja lista inteira pertence a `school_id`.
fn unanimous_matches(
    candidates: &[BackfillCandidate],
    owners: &HashMap<Uuid, Uuid>,
    school_id: Uuid,
) -> Vec<Uuid> {
    candidates
        .iter()
        .filter(|candidate| candidate.unreadable_entries == 0 && !candidate.student_ids.is_empty())
        .filter(|candidate| {
            candidate
                .student_ids
                .iter()
                .all(|id| owners.get(id) == Some(&school_id))
        })
        .map(|candidate| candidate.result_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::StudentSchool;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    // Linha da tabela `results` como o Postgres a guarda: lista em JSON cru
    #[derive(Debug, Clone)]
    struct StoredResult {
        id: Uuid,
        school_id: Option<Uuid>,
        students: Value,
    }

    // Banco em memória com a mesma semântica do Postgres
    #[derive(Default)]
    struct MemoryStore {
        results: Mutex<Vec<StoredResult>>,
        students: Vec<StudentSchool>,
        offline: bool,
        // Outra execução atribui esta nota entre a leitura e a escrita
        claimed_meanwhile: Option<(Uuid, Uuid)>,
    }

    impl MemoryStore {
        fn school_of(&self, result_id: Uuid) -> Option<Uuid> {
            self.results
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == result_id)
                .and_then(|r| r.school_id)
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn find_results_without_school(&self) -> Result<Vec<BackfillCandidate>, AppError> {
            if self.offline {
                return Err(AppError::StoreUnavailable("connection refused".into()));
            }
            Ok(self
                .results
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.school_id.is_none())
                .map(|r| BackfillCandidate::from_roster(r.id, &r.students))
                .collect())
        }

        async fn find_student_schools(
            &self,
            student_ids: &[Uuid],
        ) -> Result<Vec<StudentSchool>, AppError> {
            if let Some((result_id, school_id)) = self.claimed_meanwhile {
                for record in self.results.lock().unwrap().iter_mut() {
                    if record.id == result_id {
                        record.school_id = Some(school_id);
                    }
                }
            }
            Ok(self
                .students
                .iter()
                .filter(|s| student_ids.contains(&s.id))
                .cloned()
                .collect())
        }

        async fn assign_results_to_school(
            &self,
            result_ids: &[Uuid],
            school_id: Uuid,
        ) -> Result<u64, AppError> {
            let mut updated = 0;
            for record in self.results.lock().unwrap().iter_mut() {
                if result_ids.contains(&record.id) && record.school_id.is_none() {
                    record.school_id = Some(school_id);
                    updated += 1;
                }
            }
            Ok(updated)
        }
    }

    fn result(students: &[Uuid]) -> StoredResult {
        let entries: Vec<Value> = students
            .iter()
            .map(|id| json!({ "id": id, "name": "Aluno", "marks": "90", "grade": "A" }))
            .collect();
        StoredResult {
            id: Uuid::new_v4(),
            school_id: None,
            students: Value::Array(entries),
        }
    }

    fn owned(id: Uuid, school_id: Uuid) -> StudentSchool {
        StudentSchool { id, school_id }
    }

    #[tokio::test]
    async fn assigns_record_whose_students_all_belong_to_school() {
        let (school_a, s1) = (Uuid::new_v4(), Uuid::new_v4());
        let r1 = result(&[s1]);
        let r1_id = r1.id;

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![r1]),
            students: vec![owned(s1, school_a)],
            ..Default::default()
        });
        let service = BackfillService::new(store.clone());

        let first = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!((first.matched, first.updated), (1, 1));
        assert_eq!(store.school_of(r1_id), Some(school_a));

        // Segunda execução não encontra mais nada
        let second = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!((second.matched, second.updated), (0, 0));
    }

    #[tokio::test]
    async fn mixed_school_records_are_never_matched() {
        let (school_a, school_b) = (Uuid::new_v4(), Uuid::new_v4());
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let r2 = result(&[s1, s2]);
        let r2_id = r2.id;

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![r2]),
            students: vec![owned(s1, school_a), owned(s2, school_b)],
            ..Default::default()
        });
        let service = BackfillService::new(store.clone());

        for school in [school_a, school_b] {
            let report = service.backfill_school_ids(school, false).await.unwrap();
            assert_eq!(report.matched, 0);
            assert_eq!(report.updated, 0);
            assert_eq!(report.candidates, 1);
        }
        assert_eq!(store.school_of(r2_id), None);
    }

    #[tokio::test]
    async fn skips_empty_rosters_and_unknown_students() {
        let school_a = Uuid::new_v4();
        let s1 = Uuid::new_v4();
        let ghost = Uuid::new_v4();

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![result(&[]), result(&[s1, ghost]), result(&[s1])]),
            students: vec![owned(s1, school_a)],
            ..Default::default()
        });
        let service = BackfillService::new(store);

        let report = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!(report.candidates, 3);
        assert_eq!(report.matched, 1);
        assert_eq!(report.updated, 1);
    }

    #[tokio::test]
    async fn incomplete_legacy_entries_do_not_block_the_run() {
        let school_a = Uuid::new_v4();
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());

        // sem `grade`, `marks` numérico
        let legacy = StoredResult {
            id: Uuid::new_v4(),
            school_id: None,
            students: json!([{ "id": s1, "name": "x", "marks": 90 }]),
        };
        // uma linha sem `id`: não dá para provar que a lista é toda da escola
        let broken = StoredResult {
            id: Uuid::new_v4(),
            school_id: None,
            students: json!([{ "id": s2 }, { "name": "sem id" }]),
        };
        let complete = result(&[s2]);
        let (legacy_id, broken_id, complete_id) = (legacy.id, broken.id, complete.id);

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![legacy, broken, complete]),
            students: vec![owned(s1, school_a), owned(s2, school_a)],
            ..Default::default()
        });
        let service = BackfillService::new(store.clone());

        let report = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!(report.candidates, 3);
        assert_eq!((report.matched, report.updated), (2, 2));
        assert_eq!(store.school_of(legacy_id), Some(school_a));
        assert_eq!(store.school_of(complete_id), Some(school_a));
        assert_eq!(store.school_of(broken_id), None);
    }

    #[tokio::test]
    async fn record_claimed_before_the_write_is_not_overwritten() {
        let (school_a, school_b) = (Uuid::new_v4(), Uuid::new_v4());
        let (s1, s2) = (Uuid::new_v4(), Uuid::new_v4());
        let (first, second) = (result(&[s1]), result(&[s2]));
        let (first_id, second_id) = (first.id, second.id);

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![first, second]),
            students: vec![owned(s1, school_a), owned(s2, school_a)],
            claimed_meanwhile: Some((first_id, school_b)),
            ..Default::default()
        });
        let service = BackfillService::new(store.clone());

        let report = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!(report.matched, 2);
        assert_eq!(report.updated, 1);
        assert_eq!(store.school_of(first_id), Some(school_b));
        assert_eq!(store.school_of(second_id), Some(school_a));
    }

    #[tokio::test]
    async fn other_school_leaves_record_untouched() {
        let (school_a, school_b, s1) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![result(&[s1])]),
            students: vec![owned(s1, school_a)],
            ..Default::default()
        });
        let service = BackfillService::new(store);

        let report = service.backfill_school_ids(school_b, false).await.unwrap();
        assert_eq!((report.matched, report.updated), (0, 0));

        let report = service.backfill_school_ids(school_a, false).await.unwrap();
        assert_eq!((report.matched, report.updated), (1, 1));
    }

    #[tokio::test]
    async fn dry_run_reports_without_writing() {
        let (school_a, s1) = (Uuid::new_v4(), Uuid::new_v4());
        let r1 = result(&[s1]);
        let r1_id = r1.id;

        let store = Arc::new(MemoryStore {
            results: Mutex::new(vec![r1]),
            students: vec![owned(s1, school_a)],
            ..Default::default()
        });
        let service = BackfillService::new(store.clone());

        let report = service.backfill_school_ids(school_a, true).await.unwrap();
        assert!(report.dry_run);
        assert_eq!((report.matched, report.updated), (1, 0));
        assert_eq!(store.school_of(r1_id), None);
    }

    #[tokio::test]
    async fn nil_school_is_missing_tenant_context() {
        let service = BackfillService::new(Arc::new(MemoryStore::default()));
        let err = service.backfill_school_ids(Uuid::nil(), false).await.unwrap_err();
        assert!(matches!(err, AppError::MissingTenantContext));
    }

    #[tokio::test]
    async fn store_failure_aborts_the_run() {
        let service = BackfillService::new(Arc::new(MemoryStore {
            offline: true,
            ..Default::default()
        }));
        let err = service.backfill_school_ids(Uuid::new_v4(), false).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }
}
