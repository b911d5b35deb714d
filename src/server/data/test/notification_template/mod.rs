use crate::{
    model::status::{Channel, NotificationStatus},
    server::{
        data::{
            notification_log::NotificationLogRepository,
            notification_template::NotificationTemplateRepository,
        },
        error::AppError,
        model::notification::{CreateNotificationLogParams, NotificationTemplateParams},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod find_active_by_key;
mod update;
