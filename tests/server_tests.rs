mod common;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use common::SAMPLE_EMAIL;
use momgen::config::Settings;
use momgen::docx::paragraph::paragraph_text;
use momgen::docx::{DocxPackage, XmlDocument, DOCUMENT_PART, DOCX_CONTENT_TYPE};
use momgen::template::starter;

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<Result<()>>,
}

impl TestServer {
    async fn start(template: &Path, output_dir: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        settings.template.path = template.to_path_buf();
        settings.template.output_dir = output_dir.to_path_buf();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(momgen::web::serve_on(listener, settings, async move {
            let _ = rx.await;
        }));

        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle,
        })
    }

    fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await??;
        Ok(())
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn get_serves_the_form() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let server = TestServer::start(&tmp.path().join("missing.docx"), tmp.path()).await?;

    let response = reqwest::get(server.url()).await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await?;
    assert!(body.contains("name=\"email_text\""));
    assert!(body.contains("method=\"post\""));

    server.stop().await
}

#[tokio::test]
async fn post_returns_filled_document_and_cleans_up() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let template = tmp.path().join("MOM_template.docx");
    starter::write_starter_template(&template)?;
    let output_dir = tmp.path().join("out");
    std::fs::create_dir_all(&output_dir)?;

    let server = TestServer::start(&template, &output_dir).await?;

    let response = reqwest::Client::new()
        .post(server.url())
        .form(&[("email_text", SAMPLE_EMAIL)])
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        DOCX_CONTENT_TYPE
    );
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_DISPOSITION],
        "attachment; filename=\"MoM of the MBA Committee meeting dated November 01, 2023.docx\""
    );

    let bytes = response.bytes().await?;
    let package = DocxPackage::from_bytes(&bytes)?;
    let document = XmlDocument::parse(package.part(DOCUMENT_PART).expect("document part"))?;
    let body = document
        .root()
        .and_then(|root| root.find_child("body"))
        .expect("document body");
    let text: Vec<String> = body.child_elements().map(paragraph_text).collect();
    assert!(text.iter().any(|t| t == "November 01, 2023"));
    assert!(text
        .iter()
        .any(|t| t == "1. Confirmation of the minutes of the previous meeting"));

    assert!(
        dir_entries(&output_dir).is_empty(),
        "temporary documents should be removed: {:?}",
        dir_entries(&output_dir)
    );

    server.stop().await
}

#[tokio::test]
async fn post_without_date_uses_sentinel_name() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let template = tmp.path().join("MOM_template.docx");
    starter::write_starter_template(&template)?;

    let server = TestServer::start(&template, tmp.path()).await?;

    let response = reqwest::Client::new()
        .post(server.url())
        .form(&[("email_text", "Nothing useful in here")])
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_DISPOSITION],
        "attachment; filename=\"MoM of the MBA Committee meeting dated Unknown Date.docx\""
    );

    server.stop().await
}

#[tokio::test]
async fn missing_template_is_a_server_error() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let server = TestServer::start(&tmp.path().join("missing.docx"), tmp.path()).await?;

    let response = reqwest::Client::new()
        .post(server.url())
        .form(&[("email_text", SAMPLE_EMAIL)])
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().await?.contains("Cannot open template"));

    server.stop().await
}
