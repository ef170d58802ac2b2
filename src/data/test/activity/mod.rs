use std::collections::BTreeMap;

use chrono::{TimeDelta, TimeZone, Utc};
use test_utils::{builder::TestBuilder, factory::activity_bucket::ActivityBucketFactory};

use crate::{
    data::activity::ActivityBucketRepository,
    error::AppError,
    model::activity::Subject,
};

mod delete_all;
mod get_all;
mod increment;
