use minijinja::Environment;

// Embed the scaffold template files into the binary.

pub static BOOTSTRAP_KUSTOMIZATION: &str =
    include_str!("../asset_files/scaffold_templates/bootstrap_kustomization.yaml.j2");

pub static BOOTSTRAP_NAMESPACES: &str =
    include_str!("../asset_files/scaffold_templates/bootstrap_namespaces.yaml.j2");

pub static INFRA_KUSTOMIZATION: &str =
    include_str!("../asset_files/scaffold_templates/infrastructure_kustomization.yaml.j2");

pub static INFRA_SOURCES: &str =
    include_str!("../asset_files/scaffold_templates/infrastructure_sources.yaml.j2");

pub static INFRA_INGRESS_NGINX: &str =
    include_str!("../asset_files/scaffold_templates/infrastructure_ingress_nginx.yaml.j2");

pub static INFRA_CLOUDNATIVE_PG: &str =
    include_str!("../asset_files/scaffold_templates/infrastructure_cloudnative_pg.yaml.j2");

pub static INFRA_MONITORING: &str =
    include_str!("../asset_files/scaffold_templates/infrastructure_monitoring.yaml.j2");

pub static APPS_KUSTOMIZATION: &str =
    include_str!("../asset_files/scaffold_templates/apps_kustomization.yaml.j2");

pub static APPS_PHOENIX_APP: &str =
    include_str!("../asset_files/scaffold_templates/apps_phoenix_app.yaml.j2");

pub static APPS_DATABASE: &str =
    include_str!("../asset_files/scaffold_templates/apps_database.yaml.j2");

pub static CLUSTER_STAGES: &str =
    include_str!("../asset_files/scaffold_templates/clusters_local_stages.yaml.j2");

/// Repository-relative path of each rendered file, under the manifest root.
pub const SCAFFOLD_FILES: [(&str, &str); 11] = [
    ("bootstrap/kustomization.yaml", BOOTSTRAP_KUSTOMIZATION),
    ("bootstrap/namespaces.yaml", BOOTSTRAP_NAMESPACES),
    ("infrastructure/kustomization.yaml", INFRA_KUSTOMIZATION),
    ("infrastructure/sources.yaml", INFRA_SOURCES),
    ("infrastructure/ingress-nginx.yaml", INFRA_INGRESS_NGINX),
    ("infrastructure/cloudnative-pg.yaml", INFRA_CLOUDNATIVE_PG),
    ("infrastructure/monitoring.yaml", INFRA_MONITORING),
    ("apps/kustomization.yaml", APPS_KUSTOMIZATION),
    ("apps/phoenix-app.yaml", APPS_PHOENIX_APP),
    ("apps/database.yaml", APPS_DATABASE),
    ("clusters/local/stages.yaml", CLUSTER_STAGES),
];

pub fn template_env() -> Environment<'static> {
    Environment::new()
}
