// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo rows loaded into an empty backend when demo data is enabled.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    CollectionPoint, DatasetFormat, DatasetMetadata, FurnitureKind, FurnitureStatus, PointKind,
    PointStatus, StoredIdentity, UrbanFurniture, WasteKind,
};
use crate::services::IdentityDirectory;

pub fn demo_points() -> Vec<CollectionPoint> {
    let point = |id: &str,
                 name: &str,
                 kind,
                 (latitude, longitude): (f64, f64),
                 capacity_kg,
                 fill_level,
                 last_collection: Option<&str>,
                 waste_type| CollectionPoint {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        latitude,
        longitude,
        capacity_kg,
        fill_level,
        last_collection: last_collection.map(str::to_string),
        waste_type,
        status: PointStatus::Active,
        commune_id: None,
    };

    vec![
        point(
            "1",
            "Point de collecte Centre-ville",
            PointKind::Container,
            (14.7167, -17.4677),
            1000.0,
            Some(75.0),
            Some("2025-03-15T10:30:00"),
            WasteKind::General,
        ),
        point(
            "2",
            "Bac Marché Sandaga",
            PointKind::Bin,
            (14.6712, -17.4378),
            660.0,
            Some(30.0),
            Some("2025-03-14T07:15:00"),
            WasteKind::Organic,
        ),
        point(
            "3",
            "Centre de tri Hann",
            PointKind::Center,
            (14.7236, -17.4320),
            20000.0,
            Some(12.0),
            Some("2025-03-13T16:00:00"),
            WasteKind::Recyclable,
        ),
        point(
            "4",
            "Conteneur Médina",
            PointKind::Container,
            (14.6837, -17.4520),
            1000.0,
            None,
            None,
            WasteKind::General,
        ),
    ]
}

pub fn demo_furniture() -> Vec<UrbanFurniture> {
    let item = |id: &str,
                kind,
                location: &str,
                install_date: &str,
                last_maintenance: &str,
                status,
                description: &str,
                capacity_kg,
                fill_level| UrbanFurniture {
        id: id.to_string(),
        kind,
        name: String::new(),
        location: location.to_string(),
        description: description.to_string(),
        latitude: None,
        longitude: None,
        install_date: install_date.to_string(),
        last_maintenance: Some(last_maintenance.to_string()),
        capacity_kg,
        fill_level: Some(fill_level),
        status,
    };

    vec![
        item(
            "1",
            FurnitureKind::Prn,
            "Place de l'Indépendance",
            "2024-06-15",
            "2025-02-20",
            FurnitureStatus::Good,
            "Point de Regroupement Normalisé - Zone Centre",
            1000.0,
            45.0,
        ),
        item(
            "2",
            FurnitureKind::BacRue,
            "Avenue Léopold Sédar Senghor",
            "2024-07-01",
            "2025-03-01",
            FurnitureStatus::NeedsMaintenance,
            "Bac de rue tri sélectif",
            240.0,
            80.0,
        ),
        item(
            "3",
            FurnitureKind::PointPropre,
            "Boulevard de la République",
            "2024-05-10",
            "2025-03-10",
            FurnitureStatus::Damaged,
            "Point propre avec conteneurs enterrés",
            5000.0,
            65.0,
        ),
    ]
}

pub fn demo_datasets() -> Vec<DatasetMetadata> {
    let dataset = |id: &str,
                   name: &str,
                   description: &str,
                   category: &str,
                   source: &str,
                   last_updated: &str,
                   format,
                   owner: &str,
                   tags: &[&str]| DatasetMetadata {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        source: source.to_string(),
        last_updated: last_updated.to_string(),
        format,
        owner: owner.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };

    vec![
        dataset(
            "1",
            "Points de collecte Dakar",
            "Localisation de tous les points de collecte des déchets dans la région de Dakar",
            "Points d'intérêt",
            "Sonaged",
            "2025-03-10",
            DatasetFormat::GeoJson,
            "Direction technique",
            &["collecte", "conteneurs", "bacs"],
        ),
        dataset(
            "2",
            "Circuits de collecte 2025",
            "Tracés des circuits de collecte des déchets pour l'année 2025",
            "Itinéraires",
            "Département Logistique",
            "2025-02-15",
            DatasetFormat::Shp,
            "Service Logistique",
            &["circuits", "itinéraires", "collecte"],
        ),
        dataset(
            "3",
            "Zones de couverture",
            "Zones géographiques de couverture des services de collecte",
            "Zonage",
            "Direction Aménagement",
            "2025-01-25",
            DatasetFormat::Shp,
            "Service SIG",
            &["zones", "couverture", "aménagement"],
        ),
        dataset(
            "4",
            "Données population 2024",
            "Densité de population par quartier pour l'année 2024",
            "Statistiques",
            "Agence Nationale de la Statistique",
            "2024-12-05",
            DatasetFormat::Csv,
            "Service Planification",
            &["population", "densité", "quartiers"],
        ),
        dataset(
            "5",
            "Cadastre Dakar 2025",
            "Données cadastrales de la ville de Dakar",
            "Foncier",
            "Direction du Cadastre",
            "2025-01-10",
            DatasetFormat::Shp,
            "Service Cartographie",
            &["cadastre", "parcelles", "foncier"],
        ),
        dataset(
            "6",
            "Points de dépôt déchets dangereux",
            "Localisation des points de dépôt pour les déchets dangereux",
            "Points d'intérêt",
            "Direction Environnement",
            "2025-02-20",
            DatasetFormat::GeoJson,
            "Service Environnement",
            &["déchets dangereux", "points de dépôt", "environnement"],
        ),
    ]
}

/// Fill every empty collection with its demo rows.
pub async fn seed_demo_data(db: &Database) -> Result<(), AppError> {
    if db.list::<CollectionPoint>().await?.is_empty() {
        db.upsert_many(&demo_points()).await?;
    }
    if db.list::<UrbanFurniture>().await?.is_empty() {
        db.upsert_many(&demo_furniture()).await?;
    }
    if db.list::<DatasetMetadata>().await?.is_empty() {
        db.upsert_many(&demo_datasets()).await?;
    }
    if db.list::<StoredIdentity>().await?.is_empty() {
        db.upsert_many(&IdentityDirectory::demo_identities()).await?;
    }

    tracing::info!(backend = db.backend_name(), "Demo data seeded");
    Ok(())
}
