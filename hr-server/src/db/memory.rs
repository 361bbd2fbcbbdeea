//! In-process store
//!
//! Mirrors the MySQL constraint set: unique department code and name, job
//! code unique per department, unique employee code and email, and foreign
//! keys from job to department and employee to job.

use std::collections::BTreeMap;

use async_trait::async_trait;
use shared::models::{
    CodePrefix, Department, DepartmentCreate, DepartmentUpdate, DirectoryEntry,
    DirectoryEntryInput, DirectoryFilter, DirectoryPatch, Employee, EmployeeCreate,
    EmployeeDetail, EmployeeListing, EmployeeUpdate, JobListing, JobOption, JobTitle,
    JobTitleCreate, JobTitleUpdate, PersonnelCreate, PersonnelRecord,
};
use shared::util::{snowflake_batch, snowflake_id};
use tokio::sync::RwLock;

use super::{DirectoryStore, Entity, HrStore, PersonnelStore, RepoError, RepoResult, UniqueField};

#[derive(Default)]
struct Tables {
    last_id: i64,
    departments: BTreeMap<i64, Department>,
    jobs: BTreeMap<i64, JobTitle>,
    employees: BTreeMap<i64, Employee>,
    directory: BTreeMap<i64, DirectoryEntry>,
    personnel: BTreeMap<i64, PersonnelRecord>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_department(&self, code: &str, name: &str, exclude: Option<i64>) -> RepoResult<()> {
        let others: Vec<&Department> = self
            .departments
            .values()
            .filter(|d| Some(d.department_id) != exclude)
            .collect();
        if others.iter().any(|d| d.department_code == code) {
            return Err(RepoError::Duplicate(Some(UniqueField::DepartmentCode)));
        }
        if others.iter().any(|d| d.department_name == name) {
            return Err(RepoError::Duplicate(Some(UniqueField::DepartmentName)));
        }
        Ok(())
    }

    fn check_job(&self, department_id: i64, code: &str, exclude: Option<i64>) -> RepoResult<()> {
        if !self.departments.contains_key(&department_id) {
            return Err(RepoError::NotFound(Entity::Department, department_id));
        }
        let taken = self.jobs.values().any(|j| {
            Some(j.job_id) != exclude && j.department_id == department_id && j.job_code == code
        });
        if taken {
            return Err(RepoError::Duplicate(Some(UniqueField::JobCode)));
        }
        Ok(())
    }

    fn check_employee(
        &self,
        job_id: i64,
        code: Option<&str>,
        email: &str,
        exclude: Option<i64>,
    ) -> RepoResult<()> {
        if !self.jobs.contains_key(&job_id) {
            return Err(RepoError::NotFound(Entity::Job, job_id));
        }
        let others: Vec<&Employee> = self
            .employees
            .values()
            .filter(|e| Some(e.employee_id) != exclude)
            .collect();
        if code.is_some_and(|code| others.iter().any(|e| e.employee_code == code)) {
            return Err(RepoError::Duplicate(Some(UniqueField::EmployeeCode)));
        }
        if others.iter().any(|e| e.email == email) {
            return Err(RepoError::Duplicate(Some(UniqueField::EmployeeEmail)));
        }
        Ok(())
    }
}

/// Store kept entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HrStore for MemoryStore {
    async fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let t = self.tables.read().await;
        let mut departments: Vec<Department> = t.departments.values().cloned().collect();
        departments.sort_by(|a, b| a.department_code.cmp(&b.department_code));
        Ok(departments)
    }

    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>> {
        Ok(self.tables.read().await.departments.get(&id).cloned())
    }

    async fn create_department(&self, data: DepartmentCreate) -> RepoResult<Department> {
        let mut t = self.tables.write().await;
        t.check_department(&data.department_code, &data.department_name, None)?;
        let department = Department {
            department_id: t.next_id(),
            department_code: data.department_code,
            department_name: data.department_name,
        };
        t.departments.insert(department.department_id, department.clone());
        Ok(department)
    }

    async fn update_department(&self, id: i64, data: DepartmentUpdate) -> RepoResult<Department> {
        let mut t = self.tables.write().await;
        if !t.departments.contains_key(&id) {
            return Err(RepoError::NotFound(Entity::Department, id));
        }
        t.check_department(&data.department_code, &data.department_name, Some(id))?;
        let department = Department {
            department_id: id,
            department_code: data.department_code,
            department_name: data.department_name,
        };
        t.departments.insert(id, department.clone());
        Ok(department)
    }

    async fn delete_department(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        let jobs = t.jobs.values().filter(|j| j.department_id == id).count();
        if jobs > 0 {
            return Err(RepoError::InUse(Entity::Department, id));
        }
        t.departments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(Entity::Department, id))
    }

    async fn department_codes(&self) -> RepoResult<Vec<String>> {
        let t = self.tables.read().await;
        Ok(t.departments.values().map(|d| d.department_code.clone()).collect())
    }

    async fn list_jobs(&self) -> RepoResult<Vec<JobListing>> {
        let t = self.tables.read().await;
        let mut jobs: Vec<JobListing> = t
            .jobs
            .values()
            .filter_map(|j| {
                let d = t.departments.get(&j.department_id)?;
                Some(JobListing {
                    job_id: j.job_id,
                    job_code: j.job_code.clone(),
                    job_title: j.job_title.clone(),
                    department_id: j.department_id,
                    department_name: d.department_name.clone(),
                    department_code: d.department_code.clone(),
                })
            })
            .collect();
        jobs.sort_by(|a, b| {
            (&a.department_code, &a.job_code).cmp(&(&b.department_code, &b.job_code))
        });
        Ok(jobs)
    }

    async fn jobs_in_department(&self, department_id: i64) -> RepoResult<Vec<JobOption>> {
        let t = self.tables.read().await;
        let mut jobs: Vec<JobOption> = t
            .jobs
            .values()
            .filter(|j| j.department_id == department_id)
            .map(|j| JobOption {
                job_id: j.job_id,
                job_title: j.job_title.clone(),
            })
            .collect();
        jobs.sort_by(|a, b| a.job_title.cmp(&b.job_title));
        Ok(jobs)
    }

    async fn find_job(&self, id: i64) -> RepoResult<Option<JobTitle>> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn create_job(&self, data: JobTitleCreate) -> RepoResult<JobTitle> {
        let mut t = self.tables.write().await;
        t.check_job(data.department_id, &data.job_code, None)?;
        let job = JobTitle {
            job_id: t.next_id(),
            job_code: data.job_code,
            job_title: data.job_title,
            department_id: data.department_id,
        };
        t.jobs.insert(job.job_id, job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: i64, data: JobTitleUpdate) -> RepoResult<JobTitle> {
        let mut t = self.tables.write().await;
        if !t.jobs.contains_key(&id) {
            return Err(RepoError::NotFound(Entity::Job, id));
        }
        t.check_job(data.department_id, &data.job_code, Some(id))?;
        let job = JobTitle {
            job_id: id,
            job_code: data.job_code,
            job_title: data.job_title,
            department_id: data.department_id,
        };
        t.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn delete_job(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        let employees = t.employees.values().filter(|e| e.job_id == id).count();
        if employees > 0 {
            return Err(RepoError::InUse(Entity::Job, id));
        }
        t.jobs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(Entity::Job, id))
    }

    async fn job_codes(&self, department_id: i64) -> RepoResult<Vec<String>> {
        let t = self.tables.read().await;
        Ok(t.jobs
            .values()
            .filter(|j| j.department_id == department_id)
            .map(|j| j.job_code.clone())
            .collect())
    }

    async fn code_prefix_for_job(&self, job_id: i64) -> RepoResult<Option<CodePrefix>> {
        let t = self.tables.read().await;
        let prefix = t.jobs.get(&job_id).and_then(|j| {
            t.departments.get(&j.department_id).map(|d| CodePrefix {
                department_code: d.department_code.clone(),
                job_code: j.job_code.clone(),
            })
        });
        Ok(prefix)
    }

    async fn list_employees(&self) -> RepoResult<Vec<EmployeeListing>> {
        let t = self.tables.read().await;
        let mut employees: Vec<EmployeeListing> = t
            .employees
            .values()
            .filter_map(|e| {
                let j = t.jobs.get(&e.job_id)?;
                let d = t.departments.get(&j.department_id)?;
                Some(EmployeeListing {
                    employee_id: e.employee_id,
                    employee_code: e.employee_code.clone(),
                    employee_name: format!("{} {}", e.first_name, e.last_name),
                    job_code: j.job_code.clone(),
                    department_code: d.department_code.clone(),
                })
            })
            .collect();
        employees.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        Ok(employees)
    }

    async fn find_employee(&self, id: i64) -> RepoResult<Option<EmployeeDetail>> {
        let t = self.tables.read().await;
        Ok(t.employees.get(&id).map(|e| EmployeeDetail {
            department_id: t.jobs.get(&e.job_id).map(|j| j.department_id),
            employee: e.clone(),
        }))
    }

    async fn create_employee(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let mut t = self.tables.write().await;
        t.check_employee(data.job_id, Some(&data.employee_code), &data.email, None)?;
        let employee = Employee {
            employee_id: t.next_id(),
            employee_code: data.employee_code,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            job_id: data.job_id,
        };
        t.employees.insert(employee.employee_id, employee.clone());
        Ok(employee)
    }

    async fn update_employee(&self, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
        let mut t = self.tables.write().await;
        let Some(current) = t.employees.get(&id).cloned() else {
            return Err(RepoError::NotFound(Entity::Employee, id));
        };
        t.check_employee(data.job_id, None, &data.email, Some(id))?;
        let employee = Employee {
            employee_id: id,
            employee_code: current.employee_code,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            job_id: data.job_id,
        };
        t.employees.insert(id, employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, id: i64) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        t.employees
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(Entity::Employee, id))
    }

    async fn employee_codes_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        let t = self.tables.read().await;
        Ok(t.employees
            .values()
            .filter(|e| e.employee_code.starts_with(prefix))
            .map(|e| e.employee_code.clone())
            .collect())
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn search(&self, query: Option<&str>) -> RepoResult<Vec<DirectoryEntry>> {
        let t = self.tables.read().await;
        let query = query.filter(|q| !q.is_empty());
        let mut entries: Vec<DirectoryEntry> = t
            .directory
            .values()
            .filter(|e| query.is_none_or(|q| e.matches_query(q)))
            .cloned()
            .collect();
        entries.sort_by(|a, b| (&a.employee_id, a.id).cmp(&(&b.employee_id, b.id)));
        Ok(entries)
    }

    async fn find_entry(&self, id: i64) -> RepoResult<Option<DirectoryEntry>> {
        Ok(self.tables.read().await.directory.get(&id).cloned())
    }

    async fn insert_many(&self, entries: Vec<DirectoryEntryInput>) -> RepoResult<u64> {
        let mut t = self.tables.write().await;
        let mut inserted = 0;
        for (mut id, input) in snowflake_batch(entries.len()).into_iter().zip(entries) {
            while t.directory.contains_key(&id) {
                id = snowflake_id();
            }
            let entry = DirectoryEntry::from_input(id, input);
            t.directory.insert(entry.id, entry);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn update_many(&self, filter: &DirectoryFilter, patch: &DirectoryPatch) -> RepoResult<u64> {
        if patch.is_empty() {
            return Err(RepoError::Validation("Update must set at least one field".into()));
        }
        let mut t = self.tables.write().await;
        let mut modified = 0;
        for entry in t.directory.values_mut().filter(|e| filter.matches(e)) {
            if patch.apply(entry) {
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn delete_many(&self, filter: &DirectoryFilter) -> RepoResult<u64> {
        let mut t = self.tables.write().await;
        let before = t.directory.len();
        t.directory.retain(|_, e| !filter.matches(e));
        Ok((before - t.directory.len()) as u64)
    }

    async fn replace_entry(&self, id: i64, data: DirectoryEntryInput) -> RepoResult<DirectoryEntry> {
        let mut t = self.tables.write().await;
        let slot = t
            .directory
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(Entity::DirectoryEntry, id))?;
        *slot = DirectoryEntry::from_input(id, data);
        Ok(slot.clone())
    }
}

#[async_trait]
impl PersonnelStore for MemoryStore {
    async fn insert_personnel(&self, data: PersonnelCreate) -> RepoResult<PersonnelRecord> {
        let mut t = self.tables.write().await;
        let record = PersonnelRecord::from_create(t.next_id(), data);
        t.personnel.insert(record.id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn department(store: &MemoryStore, code: &str, name: &str) -> Department {
        store
            .create_department(DepartmentCreate {
                department_code: code.into(),
                department_name: name.into(),
            })
            .await
            .unwrap()
    }

    async fn job(store: &MemoryStore, department_id: i64, code: &str, title: &str) -> JobTitle {
        store
            .create_job(JobTitleCreate {
                job_code: code.into(),
                job_title: title.into(),
                department_id,
            })
            .await
            .unwrap()
    }

    fn employee(code: &str, email: &str, job_id: i64) -> EmployeeCreate {
        EmployeeCreate {
            employee_code: code.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            job_id,
        }
    }

    #[tokio::test]
    async fn test_department_uniqueness() {
        let store = MemoryStore::new();
        department(&store, "01", "Finance").await;

        let err = store
            .create_department(DepartmentCreate {
                department_code: "01".into(),
                department_name: "Legal".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(Some(UniqueField::DepartmentCode))));

        let err = store
            .create_department(DepartmentCreate {
                department_code: "02".into(),
                department_name: "Finance".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(Some(UniqueField::DepartmentName))));
    }

    #[tokio::test]
    async fn test_update_department_keeps_own_values() {
        let store = MemoryStore::new();
        let d = department(&store, "01", "Finance").await;
        let updated = store
            .update_department(
                d.department_id,
                DepartmentUpdate {
                    department_code: "01".into(),
                    department_name: "Finance & Tax".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.department_name, "Finance & Tax");

        let err = store
            .update_department(
                999,
                DepartmentUpdate {
                    department_code: "09".into(),
                    department_name: "Ghost".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(Entity::Department, 999)));
    }

    #[tokio::test]
    async fn test_job_code_unique_per_department() {
        let store = MemoryStore::new();
        let a = department(&store, "01", "Finance").await;
        let b = department(&store, "02", "Sales").await;
        job(&store, a.department_id, "01", "Accountant").await;
        job(&store, b.department_id, "01", "Account Manager").await;

        let err = store
            .create_job(JobTitleCreate {
                job_code: "01".into(),
                job_title: "Auditor".into(),
                department_id: a.department_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(Some(UniqueField::JobCode))));

        let err = store
            .create_job(JobTitleCreate {
                job_code: "01".into(),
                job_title: "Orphan".into(),
                department_id: 999,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(..)));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_dependents() {
        let store = MemoryStore::new();
        let d = department(&store, "01", "Finance").await;
        let j = job(&store, d.department_id, "05", "Analyst").await;
        let e = store
            .create_employee(employee("0105001", "ada@example.com", j.job_id))
            .await
            .unwrap();

        assert!(matches!(
            store.delete_department(d.department_id).await,
            Err(RepoError::InUse(..))
        ));
        assert!(matches!(store.delete_job(j.job_id).await, Err(RepoError::InUse(..))));

        store.delete_employee(e.employee_id).await.unwrap();
        store.delete_job(j.job_id).await.unwrap();
        store.delete_department(d.department_id).await.unwrap();
        assert!(matches!(
            store.delete_department(d.department_id).await,
            Err(RepoError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn test_employee_duplicates_and_listing() {
        let store = MemoryStore::new();
        let d = department(&store, "01", "Finance").await;
        let j = job(&store, d.department_id, "05", "Analyst").await;
        store
            .create_employee(employee("0105002", "ada@example.com", j.job_id))
            .await
            .unwrap();

        let err = store
            .create_employee(employee("0105002", "grace@example.com", j.job_id))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(Some(UniqueField::EmployeeCode))));

        let err = store
            .create_employee(employee("0105003", "ada@example.com", j.job_id))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(Some(UniqueField::EmployeeEmail))));

        store
            .create_employee(employee("0105001", "grace@example.com", j.job_id))
            .await
            .unwrap();
        let listing = store.list_employees().await.unwrap();
        let codes: Vec<&str> = listing.iter().map(|e| e.employee_code.as_str()).collect();
        assert_eq!(codes, ["0105001", "0105002"]);
        assert_eq!(listing[0].employee_name, "Ada Lovelace");
        assert_eq!(listing[0].department_code, "01");
    }

    #[tokio::test]
    async fn test_update_employee_keeps_code() {
        let store = MemoryStore::new();
        let d = department(&store, "01", "Finance").await;
        let j = job(&store, d.department_id, "05", "Analyst").await;
        let e = store
            .create_employee(employee("0105001", "ada@example.com", j.job_id))
            .await
            .unwrap();
        let updated = store
            .update_employee(
                e.employee_id,
                EmployeeUpdate {
                    first_name: "Augusta".into(),
                    last_name: "King".into(),
                    email: "ada@example.com".into(),
                    job_id: j.job_id,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.employee_code, "0105001");
        assert_eq!(updated.first_name, "Augusta");

        let detail = store.find_employee(e.employee_id).await.unwrap().unwrap();
        assert_eq!(detail.department_id, Some(d.department_id));
    }

    #[tokio::test]
    async fn test_update_missing_row_wins_over_missing_parent() {
        let store = MemoryStore::new();
        let err = store
            .update_job(
                404,
                JobTitleUpdate {
                    job_code: "01".into(),
                    job_title: "Ghost".into(),
                    department_id: 999,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(Entity::Job, 404)));

        let err = store
            .update_employee(
                404,
                EmployeeUpdate {
                    first_name: "Ada".into(),
                    last_name: "Lovelace".into(),
                    email: "ada@example.com".into(),
                    job_id: 999,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(Entity::Employee, 404)));
    }

    fn entry(employee_id: &str, department: &str, status: &str) -> DirectoryEntryInput {
        DirectoryEntryInput {
            employee_id: employee_id.into(),
            name: format!("Person {employee_id}"),
            department: department.into(),
            position: "Engineer".into(),
            age: 30,
            status: status.into(),
        }
    }

    #[tokio::test]
    async fn test_directory_batch_operations() {
        let store = MemoryStore::new();
        let inserted = store
            .insert_many(vec![
                entry("E1", "Platform", "active"),
                entry("E2", "Platform", "leave"),
                entry("E3", "Sales", "active"),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let filter = DirectoryFilter {
            department: Some("Platform".into()),
            ..Default::default()
        };
        let patch = DirectoryPatch {
            status: Some("active".into()),
            ..Default::default()
        };
        // E1 is already active
        assert_eq!(store.update_many(&filter, &patch).await.unwrap(), 1);

        assert_eq!(store.search(Some("sales")).await.unwrap().len(), 1);
        assert_eq!(store.search(Some("")).await.unwrap().len(), 3);
        assert_eq!(store.search(Some("  ")).await.unwrap().len(), 0);

        assert_eq!(store.delete_many(&filter).await.unwrap(), 2);
        let left = store.search(None).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].employee_id, "E3");
    }

    #[tokio::test]
    async fn test_replace_entry() {
        let store = MemoryStore::new();
        store.insert_many(vec![entry("E1", "Ops", "active")]).await.unwrap();
        let id = store.search(None).await.unwrap()[0].id;

        let replaced = store.replace_entry(id, entry("E9", "Ops", "retired")).await.unwrap();
        assert_eq!(replaced.id, id);
        assert_eq!(replaced.employee_id, "E9");

        assert!(matches!(
            store.replace_entry(id + 1, entry("E0", "Ops", "active")).await,
            Err(RepoError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn test_large_batch_keeps_every_entry() {
        let store = MemoryStore::new();
        let batch: Vec<_> = (0..500)
            .map(|i| entry(&format!("E{i:03}"), "Ops", "active"))
            .collect();
        assert_eq!(store.insert_many(batch).await.unwrap(), 500);

        let stored = store.search(None).await.unwrap();
        assert_eq!(stored.len(), 500);
        let ids: std::collections::HashSet<i64> = stored.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 500);
    }
}
