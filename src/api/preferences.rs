//! Preferences API handlers

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, info, trace};

use super::helpers::error_from_utmka;
use crate::preferences::{PreferencesStore, PreferencesUpdate};

/// 返回全部用户偏好
pub async fn get_preferences(store: web::Data<PreferencesStore>) -> ActixResult<impl Responder> {
    trace!("Preferences API: read request");
    Ok(HttpResponse::Ok().json(store.load()))
}

/// 部分更新偏好，返回合并后的完整对象
pub async fn set_preferences(
    body: web::Json<PreferencesUpdate>,
    store: web::Data<PreferencesStore>,
) -> ActixResult<impl Responder> {
    match store.update(body.into_inner()) {
        Ok(prefs) => {
            info!("Preferences API: preferences updated");
            Ok(HttpResponse::Ok().json(prefs))
        }
        Err(e) => {
            error!("Preferences API: update failed: {}", e);
            Ok(error_from_utmka(&e))
        }
    }
}
