use cemaden_store::models::{LinkCategory, LinkDirectory, LinkEntry};
use cemaden_store::schema::{
    LINK_CATEGORY_ALERTS,
    LINK_CATEGORY_DATA,
    LINK_CATEGORY_EDUCATION,
    URL_ALERT_PANEL,
    URL_EDUCATION,
    URL_INTERACTIVE_MAP,
    URL_WEBSITE,
};
use serde::Serialize;

use super::CemadenControlPlane;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinksView {
    Category {
        categoria: String,
        titulo: String,
        links: Vec<LinkEntry>,
    },
    All {
        todas_categorias: LinkDirectory,
    },
}

impl CemadenControlPlane {
    /// Returns the link directory, or one category of it.
    ///
    /// Unknown or blank categories fall back to the full directory.
    #[must_use]
    pub fn links(&self, tipo: Option<&str>) -> LinksView {
        let directory = link_directory();
        match tipo.and_then(|key| directory.category(key)) {
            Some(category) => LinksView::Category {
                categoria: category.key.clone(),
                titulo: category.titulo.clone(),
                links: category.links.clone(),
            },
            None => LinksView::All {
                todas_categorias: directory,
            },
        }
    }
}

fn link(nome: &str, url: &str, descricao: &str) -> LinkEntry {
    LinkEntry {
        nome: nome.to_string(),
        url: url.to_string(),
        descricao: descricao.to_string(),
    }
}

#[must_use]
pub fn link_directory() -> LinkDirectory {
    LinkDirectory::new(vec![
        LinkCategory {
            key: LINK_CATEGORY_ALERTS.to_string(),
            titulo: "Sistema de Alertas".to_string(),
            links: vec![link(
                "Painel de Alertas",
                URL_ALERT_PANEL,
                "Visualização de alertas ativos por estado e município",
            )],
        },
        LinkCategory {
            key: LINK_CATEGORY_DATA.to_string(),
            titulo: "Dados e Monitoramento".to_string(),
            links: vec![
                link(
                    "Mapa Interativo",
                    URL_INTERACTIVE_MAP,
                    "Dados de pluviômetros em tempo real e download de histórico",
                ),
                link("Site Oficial", URL_WEBSITE, "Portal principal do CEMADEN"),
            ],
        },
        LinkCategory {
            key: LINK_CATEGORY_EDUCATION.to_string(),
            titulo: "CEMADEN Educação".to_string(),
            links: vec![link(
                "Portal Educação",
                URL_EDUCATION,
                "Projeto educacional sobre percepção de riscos",
            )],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_keeps_category_order() {
        assert_eq!(link_directory().keys(), vec!["alertas", "dados", "educacao"]);
    }

    #[test]
    fn directory_serializes_keyed_by_category() {
        let value = serde_json::to_value(link_directory()).expect("directory should serialize");
        assert_eq!(value["dados"]["links"][1]["url"], URL_WEBSITE);
        assert!(value["alertas"].get("key").is_none());
    }
}
