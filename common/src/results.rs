use crate::history::JobId;

/// Resumen de una descarga completa de un job.
#[derive(Debug, Clone)]
pub struct RetrievalResults {
    pub job_id: JobId,
    /// Directorio `<raíz>/<job_id>/` donde quedaron los JSON
    pub output_dir: String,
    /// Nombres de archivos escritos, en el orden en que se escribieron
    pub files: Vec<String>,
    /// Tareas distintas procesadas
    pub tasks: usize,
}

impl RetrievalResults {
    pub fn new(job_id: &str, output_dir: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            output_dir: output_dir.to_string(),
            files: Vec::new(),
            tasks: 0,
        }
    }

    /// 3 archivos del job + 3 por tarea.
    pub fn expected_files(&self) -> usize {
        3 + 3 * self.tasks
    }
}
