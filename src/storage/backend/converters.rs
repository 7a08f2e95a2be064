//! Model converters between domain structs and SeaORM entities

use chrono::{DateTime, Utc};

use crate::storage::models::{NewTemplate, NewUtmLink, Template, UtmLink};
use migration::entities::{history_link, template};

/// 将 SeaORM Model 转换为 UtmLink
pub fn model_to_utm_link(model: history_link::Model) -> UtmLink {
    UtmLink {
        id: model.id,
        owner: model.owner,
        base_url: model.base_url,
        full_url: model.full_url,
        utm_source: model.utm_source,
        utm_medium: model.utm_medium,
        utm_campaign: model.utm_campaign,
        utm_content: model.utm_content,
        utm_term: model.utm_term,
        short_url: model.short_url,
        tag_name: model.tag_name,
        tag_color: model.tag_color,
        created_at: model.created_at,
    }
}

/// 将待插入的历史记录转换为 ActiveModel（id 由数据库分配）
pub fn new_utm_link_to_active_model(
    link: &NewUtmLink,
    created_at: DateTime<Utc>,
) -> history_link::ActiveModel {
    use sea_orm::ActiveValue::*;

    history_link::ActiveModel {
        id: NotSet,
        owner: Set(link.owner.clone()),
        base_url: Set(link.base_url.clone()),
        full_url: Set(link.full_url.clone()),
        utm_source: Set(link.utm_source.clone()),
        utm_medium: Set(link.utm_medium.clone()),
        utm_campaign: Set(link.utm_campaign.clone()),
        utm_content: Set(link.utm_content.clone()),
        utm_term: Set(link.utm_term.clone()),
        short_url: Set(link.short_url.clone()),
        tag_name: Set(link.tag_name.clone()),
        tag_color: Set(link.tag_color.clone()),
        created_at: Set(created_at),
    }
}

/// 将 SeaORM Model 转换为 Template
pub fn model_to_template(model: template::Model) -> Template {
    Template {
        id: model.id,
        owner: model.owner,
        name: model.name,
        utm_source: model.utm_source,
        utm_medium: model.utm_medium,
        utm_campaign: model.utm_campaign,
        utm_content: model.utm_content,
        utm_term: model.utm_term,
        tag_name: model.tag_name,
        tag_color: model.tag_color,
        created_at: model.created_at,
    }
}

/// 将待插入的模板转换为 ActiveModel（id 由数据库分配）
pub fn new_template_to_active_model(
    tpl: &NewTemplate,
    created_at: DateTime<Utc>,
) -> template::ActiveModel {
    use sea_orm::ActiveValue::*;

    template::ActiveModel {
        id: NotSet,
        owner: Set(tpl.owner.clone()),
        name: Set(tpl.name.clone()),
        utm_source: Set(tpl.utm_source.clone()),
        utm_medium: Set(tpl.utm_medium.clone()),
        utm_campaign: Set(tpl.utm_campaign.clone()),
        utm_content: Set(tpl.utm_content.clone()),
        utm_term: Set(tpl.utm_term.clone()),
        tag_name: Set(tpl.tag_name.clone()),
        tag_color: Set(tpl.tag_color.clone()),
        created_at: Set(created_at),
    }
}
