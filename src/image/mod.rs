// Application image build and push, talking to the Docker daemon directly.

use std::path::Path;

use anyhow::{bail, Context, Result};
use bollard::auth::DockerCredentials;
use bollard::errors::Error as DockerError;
use bollard::image::{BuildImageOptions, PushImageOptions, TagImageOptions};
use futures::StreamExt;
use simplelog::*;

use crate::clients;
use crate::configparser::config::HomelabConfig;

pub struct ImageTags {
    pub repo: String,
    pub tagged: String,
    pub latest: String,
}

/// `<DOCKER_USERNAME>/<IMAGE_NAME>` with both the configured tag and :latest.
pub fn image_tags(config: &HomelabConfig) -> Result<ImageTags> {
    let Some(username) = config.docker_username.as_deref().filter(|u| !u.is_empty()) else {
        bail!("DOCKER_USERNAME must be set to tag the image");
    };

    let repo = format!("{username}/{}", config.image_name);
    Ok(ImageTags {
        tagged: format!("{repo}:{}", config.tag),
        latest: format!("{repo}:latest"),
        repo,
    })
}

/// Build the image from the given context directory, tag it as both the
/// configured tag and :latest, and optionally push both.
pub async fn build(config: &HomelabConfig, context_dir: &Path, push: bool) -> Result<()> {
    let tags = image_tags(config)?;
    let client = clients::docker().await?;

    if !context_dir.join("Dockerfile").is_file() {
        bail!("no Dockerfile in {}", context_dir.display());
    }

    info!(
        "building <bold>{}</> from {}...",
        tags.tagged,
        context_dir.display()
    );

    let build_opts = BuildImageOptions {
        dockerfile: "Dockerfile".to_string(),
        t: tags.tagged.clone(),
        forcerm: true,
        ..Default::default()
    };

    // tar up the build context for the daemon
    let mut tar = tar::Builder::new(Vec::new());
    tar.append_dir_all("", context_dir)
        .context("could not create image context tarball")?;
    let tarball = tar.into_inner()?;

    let mut build_stream = client.build_image(build_opts, None, Some(tarball.into()));

    while let Some(item) = build_stream.next().await {
        match item {
            Err(DockerError::DockerStreamError { error }) => bail!("build error: {error}"),
            Err(other) => bail!("build error: {other:?}"),
            Ok(msg) => {
                if let Some(e) = msg.error_detail {
                    bail!(
                        "error building image: {}",
                        e.message.unwrap_or("".to_string())
                    );
                }
                if let Some(log) = msg.stream {
                    info!("building: <bright-black>{}</>", log.trim());
                }
            }
        }
    }

    client
        .tag_image(
            &tags.tagged,
            Some(TagImageOptions {
                repo: tags.repo.clone(),
                tag: "latest".to_string(),
            }),
        )
        .await
        .context("could not tag image as :latest")?;

    info!("<green>image built: {}</>", tags.tagged);

    if push {
        push_tag(&client, config, &tags.repo, &config.tag).await?;
        push_tag(&client, config, &tags.repo, "latest").await?;
    }

    Ok(())
}

async fn push_tag(
    client: &bollard::Docker,
    config: &HomelabConfig,
    repo: &str,
    tag: &str,
) -> Result<()> {
    info!("pushing <bold>{repo}:{tag}</> to registry...");

    // without a password the push rides on whatever `docker login` left behind
    let creds = config.docker_password.as_ref().map(|pass| DockerCredentials {
        username: config.docker_username.clone(),
        password: Some(pass.clone()),
        ..Default::default()
    });

    let opts = PushImageOptions { tag };
    let mut push_stream = client.push_image(repo, Some(opts), creds);

    while let Some(item) = push_stream.next().await {
        match item {
            Err(DockerError::DockerResponseServerError { message, .. }) => {
                bail!("error from daemon: {message}")
            }
            Err(e) => bail!("{e:?}"),
            Ok(msg) => {
                debug!("{msg:?}");
                if let Some(progress) = msg.progress_detail {
                    trace!("progress: {:?}/{:?}", progress.current, progress.total);
                }
            }
        }
    }

    info!("<green>pushed {repo}:{tag}</>");
    Ok(())
}
