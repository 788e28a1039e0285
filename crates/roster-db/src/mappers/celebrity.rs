//! Celebrity entity <-> model mapper

use roster_core::entities::Celebrity;
use roster_core::value_objects::Snowflake;

use crate::models::CelebrityModel;

impl From<CelebrityModel> for Celebrity {
    fn from(model: CelebrityModel) -> Self {
        Celebrity {
            id: Snowflake::new(model.id),
            name: model.name,
            name_en: model.name_en,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
