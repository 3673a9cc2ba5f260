use anyhow::{bail, Result};
use serde::Deserialize;

pub type JobId = String;
pub type TaskId = String;

/// Ruta fija de la API REST del History Server (MapReduce, Hadoop 2.x).
pub const HISTORY_JOBS_PATH: &str = "ws/v1/history/mapreduce/jobs/";

/// Raíz de recursos a partir de la dirección base del History Server.
/// Acepta la dirección con o sin '/' final:
///   http://host:1234/  ->  http://host:1234/ws/v1/history/mapreduce/jobs/
pub fn resource_root(history_server: &str) -> String {
    format!("{}/{}", history_server.trim_end_matches('/'), HISTORY_JOBS_PATH)
}

/* --------- Recursos que se descargan por job --------- */

/// Cada recurso sabe su ruta relativa a la raíz y el archivo donde se guarda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryResource<'a> {
    Job,
    JobCounters,
    Tasks,
    Task(&'a str),
    TaskCounters(&'a str),
    TaskAttempts(&'a str),
}

impl HistoryResource<'static> {
    /// Recursos del job, en el orden en que se piden.
    pub const JOB_RESOURCES: [Self; 3] = [
        HistoryResource::Job,
        HistoryResource::JobCounters,
        HistoryResource::Tasks,
    ];
}

impl<'a> HistoryResource<'a> {
    /// Los tres recursos que se piden por cada tarea (info, counters, attempts).
    pub fn for_task(task_id: &'a str) -> [HistoryResource<'a>; 3] {
        [
            HistoryResource::Task(task_id),
            HistoryResource::TaskCounters(task_id),
            HistoryResource::TaskAttempts(task_id),
        ]
    }

    pub fn path(&self, job_id: &str) -> String {
        match self {
            HistoryResource::Job => job_id.to_string(),
            HistoryResource::JobCounters => format!("{job_id}/counters"),
            HistoryResource::Tasks => format!("{job_id}/tasks"),
            HistoryResource::Task(task_id) => format!("{job_id}/tasks/{task_id}"),
            HistoryResource::TaskCounters(task_id) => {
                format!("{job_id}/tasks/{task_id}/counters")
            }
            HistoryResource::TaskAttempts(task_id) => {
                format!("{job_id}/tasks/{task_id}/attempts")
            }
        }
    }

    /// URL completa; `root` es lo que devuelve [`resource_root`].
    pub fn url(&self, root: &str, job_id: &str) -> String {
        format!("{}{}", root, self.path(job_id))
    }

    pub fn file_name(&self) -> String {
        match self {
            HistoryResource::Job => "job_info.json".to_string(),
            HistoryResource::JobCounters => "job_counters.json".to_string(),
            HistoryResource::Tasks => "tasks_info.json".to_string(),
            HistoryResource::Task(task_id) => format!("{task_id}_info.json"),
            HistoryResource::TaskCounters(task_id) => format!("{task_id}_counters.json"),
            HistoryResource::TaskAttempts(task_id) => format!("{task_id}_attempts.json"),
        }
    }
}

/* --------- Vista tipada de la lista de tareas --------- */

/// Sólo se modela lo que se consume: `tasks.task[].id`.
/// Si falta cualquier nivel, el JSON completo se rechaza.
#[derive(Debug, Clone, Deserialize)]
pub struct TasksResponse {
    pub tasks: TaskList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    pub task: Vec<TaskRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskRef {
    pub id: TaskId,
}

impl TasksResponse {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Ids en el orden que devolvió el servidor (puede haber repetidos).
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.task.iter().map(|t| t.id.as_str())
    }
}

/* --------- Resultado explícito de un GET --------- */

/// Resultado de una petición que sí llegó a completarse.
/// Los errores de transporte no pasan por aquí: se propagan como `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { body: Vec<u8> },
    Failure { status: u16, body: Option<Vec<u8>> },
}

impl FetchOutcome {
    pub fn from_response(status: u16, body: Vec<u8>) -> Self {
        if (200..300).contains(&status) {
            FetchOutcome::Success { body }
        } else {
            FetchOutcome::Failure {
                status,
                body: if body.is_empty() { None } else { Some(body) },
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// Devuelve el cuerpo o un error con la URL y el status recibido.
    pub fn into_body(self, url: &str) -> Result<Vec<u8>> {
        match self {
            FetchOutcome::Success { body } => Ok(body),
            FetchOutcome::Failure { status, body: None } => {
                bail!("GET {url} devolvió status {status}")
            }
            FetchOutcome::Failure {
                status,
                body: Some(body),
            } => {
                let text = String::from_utf8_lossy(&body);
                let snippet: String = text.chars().take(200).collect();
                bail!("GET {url} devolvió status {status}: {}", snippet.trim())
            }
        }
    }
}
