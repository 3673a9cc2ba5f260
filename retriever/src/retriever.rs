use anyhow::{ensure, Context, Result};
use common::{resource_root, FetchOutcome, HistoryResource, RetrievalResults, TasksResponse};
use reqwest::{header, Client};
use std::{
    collections::HashSet,
    env, fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Valor que se manda tal cual en la cabecera Authorization (ej: "Negotiate <token>").
/// La credencial ya tiene que existir; aquí no se negocia nada. Un token SPNEGO
/// sólo vale una vez, así que se manda hasta que el servidor entrega la cookie
/// de sesión (hadoop.auth) y a partir de ahí autentica la cookie.
pub const AUTHORIZATION_ENV: &str = "HISTORY_SERVER_AUTHORIZATION";

/// Timeout por petición en segundos. Sin definir => sin timeout.
pub const TIMEOUT_ENV: &str = "HISTORY_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    pub history_server: String,
    pub job_id: String,
    pub output_root: PathBuf,
    pub authorization: Option<String>,
    pub timeout: Option<Duration>,
}

impl RetrieverConfig {
    pub fn new(
        history_server: impl Into<String>,
        job_id: impl Into<String>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            history_server: history_server.into(),
            job_id: job_id.into(),
            output_root: output_root.into(),
            authorization: None,
            timeout: None,
        }
    }

    /// Completa credencial y timeout desde las variables de entorno.
    pub fn with_env(self) -> Self {
        self.with_vars(env::var(AUTHORIZATION_ENV).ok(), env::var(TIMEOUT_ENV).ok())
    }

    /// Igual que `with_env` pero con los valores ya leídos.
    /// Vacío o no numérico (o 0 en el timeout) cuenta como no definido.
    pub fn with_vars(mut self, authorization: Option<String>, timeout: Option<String>) -> Self {
        self.authorization = authorization.filter(|s| !s.trim().is_empty());
        self.timeout = timeout
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        self
    }

    /// Siempre `<raíz>/<job_id>/`, con o sin '/' final en la raíz.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(&self.job_id)
    }
}

/// Cliente HTTP contra la API REST del History Server.
/// Guarda las cookies que devuelve el servidor, así la sesión de Hadoop
/// (hadoop.auth) autentica las peticiones siguientes.
pub struct HistoryClient {
    client: Client,
    root: String,
    authorization: Option<header::HeaderValue>,
    /// true en cuanto el servidor entregó una cookie de sesión
    session: AtomicBool,
}

impl HistoryClient {
    pub fn new(config: &RetrieverConfig) -> Result<Self> {
        let authorization = match &config.authorization {
            Some(auth) => {
                let mut value = header::HeaderValue::from_str(auth).with_context(|| {
                    format!("{AUTHORIZATION_ENV} no es un valor de cabecera válido")
                })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("no se pudo construir el cliente HTTP")?;

        Ok(Self {
            client,
            root: resource_root(&config.history_server),
            authorization,
            session: AtomicBool::new(false),
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// GET completo. Sólo los errores de transporte devuelven `Err`;
    /// cualquier status llega como `FetchOutcome`.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(auth) = &self.authorization {
            if !self.session.load(Ordering::Relaxed) {
                request = request.header(header::AUTHORIZATION, auth.clone());
            }
        }

        let resp = request
            .send()
            .await
            .with_context(|| format!("error HTTP al pedir {url}"))?;

        if resp.headers().contains_key(header::SET_COOKIE)
            && !self.session.swap(true, Ordering::Relaxed)
        {
            debug!("el servidor entregó cookie de sesión; se deja de mandar Authorization");
        }

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .with_context(|| format!("error leyendo la respuesta de {url}"))?;

        let outcome = FetchOutcome::from_response(status, body.to_vec());
        if !outcome.is_success() {
            warn!("GET {} devolvió status {}", url, status);
        }
        Ok(outcome)
    }
}

/// Pide un recurso y guarda el cuerpo sin tocar en `output_dir`.
async fn download(
    client: &HistoryClient,
    resource: HistoryResource<'_>,
    job_id: &str,
    output_dir: &Path,
    results: &mut RetrievalResults,
) -> Result<Vec<u8>> {
    let url = resource.url(client.root(), job_id);
    let body = client.fetch(&url).await?.into_body(&url)?;

    let file_name = resource.file_name();
    let path = output_dir.join(&file_name);
    fs::write(&path, &body).with_context(|| format!("no se pudo escribir {}", path.display()))?;
    debug!("escrito {} ({} bytes)", path.display(), body.len());

    results.files.push(file_name);
    Ok(body)
}

/// Descarga info, counters y lista de tareas del job, y luego info, counters y
/// attempts de cada tarea. Secuencial; el primer error aborta la descarga y lo
/// ya escrito queda en disco.
pub async fn retrieve(
    client: &HistoryClient,
    config: &RetrieverConfig,
) -> Result<RetrievalResults> {
    let job_id = config.job_id.as_str();
    let output_dir = config.output_dir();

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("no se pudo crear {}", output_dir.display()))?;

    let mut results = RetrievalResults::new(job_id, &output_dir.to_string_lossy());

    let mut tasks_body = Vec::new();
    for resource in HistoryResource::JOB_RESOURCES {
        let body = download(client, resource, job_id, &output_dir, &mut results).await?;
        if resource == HistoryResource::Tasks {
            tasks_body = body;
        }
    }

    let tasks = TasksResponse::from_slice(&tasks_body).with_context(|| {
        format!("la lista de tareas de {job_id} no tiene la forma tasks.task[].id")
    })?;
    info!("job {}: {} tareas", job_id, tasks.tasks.task.len());

    let mut seen = HashSet::new();
    for task_id in tasks.task_ids() {
        if !seen.insert(task_id) {
            warn!("tarea {} repetida en la lista, se ignora", task_id);
            continue;
        }
        for resource in HistoryResource::for_task(task_id) {
            download(client, resource, job_id, &output_dir, &mut results).await?;
        }
        results.tasks += 1;
    }

    ensure!(
        results.files.len() == results.expected_files(),
        "job {}: se escribieron {} archivos, se esperaban {}",
        job_id,
        results.files.len(),
        results.expected_files()
    );

    info!(
        "job {} descargado en {} ({} archivos)",
        job_id,
        results.output_dir,
        results.files.len()
    );
    Ok(results)
}
