use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{
    vacancy, vacancy_localization, Language, Vacancy, VacancyLocalization, VacancyModel,
};
use crate::errors::ServiceError;

/// Localized title/description pair for a vacancy.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VacancyText {
    pub language_code: String,
    pub title: String,
    pub description: Option<String>,
}

/// Vacancy aggregated with its per-language texts.
#[derive(Debug, Serialize, ToSchema)]
pub struct VacancyView {
    #[serde(flatten)]
    pub vacancy: VacancyModel,
    pub localizations: Vec<VacancyText>,
}

#[derive(Clone)]
pub struct VacancyService {
    db: Arc<DatabaseConnection>,
}

impl VacancyService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, localizations))]
    pub async fn create(
        &self,
        is_open: bool,
        localizations: Vec<VacancyText>,
    ) -> Result<VacancyView, ServiceError> {
        self.ensure_languages_exist(&localizations).await?;

        let vacancy_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let created = vacancy::ActiveModel {
            id: Set(vacancy_id),
            is_open: Set(is_open),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for loc in &localizations {
            vacancy_localization::ActiveModel {
                id: Set(Uuid::new_v4()),
                vacancy_id: Set(vacancy_id),
                language_code: Set(loc.language_code.clone()),
                title: Set(loc.title.clone()),
                description: Set(loc.description.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created vacancy: {}", vacancy_id);

        Ok(VacancyView {
            vacancy: created,
            localizations,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid, lang: Option<&str>) -> Result<VacancyView, ServiceError> {
        let vacancy = Vacancy::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vacancy {} not found", id)))?;

        let mut query = vacancy.find_related(VacancyLocalization);
        if let Some(lang) = lang {
            query = query.filter(vacancy_localization::Column::LanguageCode.eq(lang));
        }
        let localizations = query.all(&*self.db).await?;

        Ok(VacancyView {
            vacancy,
            localizations: localizations.into_iter().map(to_vacancy_text).collect(),
        })
    }

    /// Lists vacancies, optionally restricted to open ones.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        open_only: bool,
        lang: Option<&str>,
    ) -> Result<Vec<VacancyView>, ServiceError> {
        let mut query = Vacancy::find().order_by_desc(vacancy::Column::CreatedAt);
        if open_only {
            query = query.filter(vacancy::Column::IsOpen.eq(true));
        }
        let vacancies = query.all(&*self.db).await?;

        let localizations = vacancies.load_many(VacancyLocalization, &*self.db).await?;

        Ok(vacancies
            .into_iter()
            .zip(localizations)
            .map(|(vacancy, locs)| VacancyView {
                vacancy,
                localizations: locs
                    .into_iter()
                    .filter(|l| lang.map_or(true, |code| l.language_code == code))
                    .map(to_vacancy_text)
                    .collect(),
            })
            .collect())
    }

    #[instrument(skip(self, localizations))]
    pub async fn update(
        &self,
        id: Uuid,
        is_open: Option<bool>,
        localizations: Option<Vec<VacancyText>>,
    ) -> Result<VacancyView, ServiceError> {
        let existing = Vacancy::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vacancy {} not found", id)))?;

        if let Some(ref locs) = localizations {
            self.ensure_languages_exist(locs).await?;
        }

        let txn = self.db.begin().await?;

        let mut active: vacancy::ActiveModel = existing.into();
        if let Some(is_open) = is_open {
            active.is_open = Set(is_open);
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        if let Some(locs) = &localizations {
            VacancyLocalization::delete_many()
                .filter(vacancy_localization::Column::VacancyId.eq(id))
                .exec(&txn)
                .await?;
            for loc in locs {
                vacancy_localization::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    vacancy_id: Set(id),
                    language_code: Set(loc.language_code.clone()),
                    title: Set(loc.title.clone()),
                    description: Set(loc.description.clone()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        self.get(id, None).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Vacancy::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vacancy {} not found", id)))?;
        existing.delete(&*self.db).await?;
        info!("Deleted vacancy: {}", id);
        Ok(())
    }

    async fn ensure_languages_exist(&self, locs: &[VacancyText]) -> Result<(), ServiceError> {
        for loc in locs {
            if Language::find_by_id(&loc.language_code)
                .one(&*self.db)
                .await?
                .is_none()
            {
                return Err(ServiceError::InvalidInput(format!(
                    "Unknown language code: {}",
                    loc.language_code
                )));
            }
        }
        Ok(())
    }
}

fn to_vacancy_text(model: vacancy_localization::Model) -> VacancyText {
    VacancyText {
        language_code: model.language_code,
        title: model.title,
        description: model.description,
    }
}
