use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::listing::{ImageAsset, ImageText};

// Registros sem order_index vão para o fim da visão plana.
const ORDER_SENTINEL: u32 = u32::MAX;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GallerySlot {
    pub image: ImageAsset,

    /// `None` é o estado "imagem sem texto" — válido e esperado.
    /// Nunca usamos string vazia: vazia é um resultado extraído legítimo.
    #[serde(default)]
    pub text: Option<ImageText>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReconcileResult {
    pub gallery: Vec<GallerySlot>,
    pub ordered_texts: Vec<ImageText>,
}

pub fn reconcile(images: &[ImageAsset], texts: &[ImageText]) -> ReconcileResult {
    // Lookup por URL na ordem de entrada: chave duplicada sobrescreve a
    // anterior (last-write-wins). Comportamento contratual do upstream,
    // não reordenar antes de montar o mapa.
    let mut by_url: HashMap<&str, &ImageText> = HashMap::new();
    for text in texts {
        by_url.insert(text.image_url.as_str(), text);
    }

    let gallery = images
        .iter()
        .map(|image| GallerySlot {
            image: image.clone(),
            text: by_url.get(image.url.as_str()).map(|&t| t.clone()),
        })
        .collect();

    // Visão plana: todos os registros de entrada, inclusive os que não
    // casam com imagem nenhuma. Sort estável preserva a ordem relativa
    // entre índices iguais (e entre os sem índice).
    let mut ordered_texts: Vec<ImageText> = texts.to_vec();
    ordered_texts.sort_by_key(|t| t.order_index.unwrap_or(ORDER_SENTINEL));

    ReconcileResult {
        gallery,
        ordered_texts,
    }
}
