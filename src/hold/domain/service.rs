use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::children::domain::Child;
use crate::children::domain::model::ChildEntity;
use crate::children::repository::ChildRepository;
use crate::core::domain::Configuration;
use crate::core::pool::{ChildStatus, HoldState, PoolError, PoolResult, PaginatedResult};
use crate::core::settings::AvailabilitySettings;
use crate::gateway::queue::{ConnectAction, MessageQueue};
use crate::hold::domain::HoldService;
use crate::hold::domain::expiration::ExpirationCalculator;
use crate::hold::domain::model::{HoldEntity, HoldValues};
use crate::hold::domain::types::HoldType;
use crate::hold::dto::HoldDto;
use crate::hold::mapping::{ConnectMapping, ReinstatementMapping, ReservationToHoldMapping};
use crate::hold::repository::HoldRepository;

const REINSTATEMENT_LIST: &str = "BeneficiaryReinstatementNotificationList";
const RESERVATION_TO_HOLD: &str = "GlobalPartnerBeneficiaryReservationToHoldNotification";
const SPONSOR_CANCEL_SOURCE: &str = "sponsor_cancel";

pub(crate) struct HoldServiceImpl {
    system_user: String,
    sweep_page_size: usize,
    hold_repository: Box<dyn HoldRepository>,
    child_repository: Box<dyn ChildRepository>,
    message_queue: Box<dyn MessageQueue>,
    expiration_calculator: ExpirationCalculator,
    reinstatement_mapping: Box<dyn ConnectMapping>,
    reservation_mapping: Box<dyn ConnectMapping>,
}

impl HoldServiceImpl {
    pub(crate) fn new(config: &Configuration, hold_repository: Box<dyn HoldRepository>,
                      child_repository: Box<dyn ChildRepository>, message_queue: Box<dyn MessageQueue>,
                      settings: Box<dyn AvailabilitySettings>) -> Self {
        Self {
            system_user: config.system_user.to_string(),
            sweep_page_size: config.sweep_page_size,
            hold_repository,
            child_repository,
            message_queue,
            expiration_calculator: ExpirationCalculator::new(settings),
            reinstatement_mapping: Box::new(ReinstatementMapping::new()),
            reservation_mapping: Box::new(ReservationToHoldMapping::new()),
        }
    }

    // Builds a new draft hold without storing it.
    async fn prepare_hold(&self, values: &HoldValues, default_type: HoldType) -> PoolResult<HoldEntity> {
        let hold_type = values.hold_type.unwrap_or(default_type);
        let expiration = match values.expiration_date {
            Some(expiration) => expiration,
            None => self.expiration_calculator.compute_default_expiration(hold_type).await?,
        };
        let mut hold = HoldEntity::new(self.system_user.as_str(), hold_type, expiration);
        hold.apply(values);
        Ok(hold)
    }

    // Stores a new draft hold without telling Connect.
    async fn insert_hold(&self, values: &HoldValues, default_type: HoldType) -> PoolResult<HoldEntity> {
        let hold = self.prepare_hold(values, default_type).await?;
        self.hold_repository.create(&hold).await?;
        debug!(hold = hold.id.as_str(), hold_type = hold.hold_type.label(), "created hold");
        Ok(hold)
    }

    // Removes records created earlier in a failed operation. Failures are only logged,
    // the original error is the one returned.
    async fn discard(&self, holds: &[HoldEntity], child: Option<&ChildEntity>) {
        for hold in holds {
            if let Err(err) = self.hold_repository.delete(hold.id.as_str()).await {
                warn!(hold = hold.id.as_str(), error = %err, "failed to discard hold");
            }
        }
        if let Some(child) = child {
            if let Err(err) = self.child_repository.delete(child.child_id.as_str()).await {
                warn!(child = child.child_id.as_str(), error = %err, "failed to discard child");
            }
        }
    }

    async fn write_hold(&self, hold: &mut HoldEntity, values: &HoldValues, no_upsert: bool) -> PoolResult<()> {
        hold.apply(values);
        self.save_hold(hold).await?;
        if values.is_significant() && !no_upsert {
            self.message_queue.enqueue(ConnectAction::CreateHold, hold.id.as_str()).await?;
        }
        Ok(())
    }

    async fn save_hold(&self, hold: &mut HoldEntity) -> PoolResult<()> {
        self.hold_repository.update(hold).await?;
        hold.version += 1;
        Ok(())
    }

    async fn save_child(&self, child: &mut ChildEntity) -> PoolResult<()> {
        self.child_repository.update(child).await?;
        child.version += 1;
        Ok(())
    }

    // the child a hold points to, if it still exists
    async fn load_child(&self, hold: &HoldEntity) -> PoolResult<Option<ChildEntity>> {
        match &hold.child_id {
            Some(child_id) => match self.child_repository.get(child_id).await {
                Ok(child) => Ok(Some(child)),
                Err(PoolError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            },
            None => Ok(None),
        }
    }

    async fn resolve_child_id(&self, global_id: &Option<String>) -> PoolResult<Option<String>> {
        match global_id {
            Some(global_id) => Ok(self.child_repository.find_by_global_id(global_id).await?
                .map(|child| child.child_id)),
            None => Ok(None),
        }
    }

    async fn expire(&self, hold: &mut HoldEntity) -> PoolResult<()> {
        hold.state = HoldState::Expired;
        self.save_hold(hold).await?;
        if let Some(mut child) = self.load_child(hold).await? {
            child.active = false;
            self.save_child(&mut child).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl HoldService for HoldServiceImpl {
    async fn compute_default_expiration(&self, hold_type: HoldType) -> PoolResult<NaiveDateTime> {
        self.expiration_calculator.compute_default_expiration(hold_type).await
    }

    async fn create_hold(&self, values: &HoldValues) -> PoolResult<HoldDto> {
        let hold = self.insert_hold(values, HoldType::default()).await?;
        self.message_queue.enqueue(ConnectAction::CreateHold, hold.id.as_str()).await?;
        info!(hold = hold.id.as_str(), "requested hold");
        Ok(HoldDto::from(&hold))
    }

    async fn update_hold(&self, id: &str, values: &HoldValues, no_upsert: bool) -> PoolResult<HoldDto> {
        let mut hold = self.hold_repository.get(id).await?;
        self.write_hold(&mut hold, values, no_upsert).await?;
        Ok(HoldDto::from(&hold))
    }

    async fn change_type(&self, id: &str, hold_type: HoldType) -> PoolResult<HoldDto> {
        let expiration = self.compute_default_expiration(hold_type).await?;
        let values = HoldValues {
            hold_type: Some(hold_type),
            expiration_date: Some(expiration),
            ..Default::default()
        };
        self.update_hold(id, &values, false).await
    }

    async fn apply_external_confirmation(&self, id: &str, values: &HoldValues) -> PoolResult<Option<HoldDto>> {
        let mut hold = self.hold_repository.get(id).await?;
        if hold.state.is_expired() {
            return Err(PoolError::precondition(
                format!("hold {} is expired and cannot be confirmed", id).as_str(), None));
        }
        if values.has_hold_id() {
            hold.apply(values);
            hold.state = HoldState::Active;
            self.save_hold(&mut hold).await?;
            if let Some(mut child) = self.load_child(&hold).await? {
                child.hold_id = Some(hold.id.to_string());
                child.active = true;
                child.status = ChildStatus::Consigned;
                self.save_child(&mut child).await?;
            }
            info!(hold = hold.id.as_str(), hold_id = hold.hold_id.as_deref(), "hold confirmed by connect");
            Ok(Some(HoldDto::from(&hold)))
        } else {
            if let Some(child_id) = &hold.child_id {
                self.child_repository.delete(child_id).await?;
            }
            self.hold_repository.delete(hold.id.as_str()).await?;
            warn!(hold = hold.id.as_str(), "hold refused by connect, removed");
            Ok(None)
        }
    }

    async fn create_from_reinstatement(&self, payload: &Value) -> PoolResult<Vec<String>> {
        let notifications: Vec<&Value> = match payload.get(REINSTATEMENT_LIST) {
            Some(Value::Array(list)) => list.iter().collect(),
            _ => vec![payload],
        };
        // every notification is mapped before the first write
        let expiration = self.compute_default_expiration(HoldType::Reinstatement).await?;
        let mut prepared = vec![];
        for notification in notifications {
            let mapped = self.reinstatement_mapping.get_vals_from_connect(notification)?;
            let mut values = mapped.values;
            values.child_id = self.resolve_child_id(&mapped.global_id).await?;
            // reinstated holds always run for the reinstatement duration
            values.expiration_date = Some(expiration);
            prepared.push(self.prepare_hold(&values, HoldType::Reinstatement).await?);
        }

        let mut created: Vec<HoldEntity> = vec![];
        for hold in prepared {
            if let Err(err) = self.hold_repository.create(&hold).await {
                self.discard(&created, None).await;
                return Err(err);
            }
            debug!(hold = hold.id.as_str(), hold_type = hold.hold_type.label(), "created hold");
            created.push(hold);
        }
        for hold in &created {
            self.message_queue.enqueue(ConnectAction::CreateHold, hold.id.as_str()).await?;
        }
        info!(count = created.len(), "created holds from reinstatement");
        Ok(created.into_iter().map(|hold| hold.id).collect())
    }

    async fn convert_reservation_to_hold(&self, payload: &Value) -> PoolResult<Vec<String>> {
        let notification = match payload.get(RESERVATION_TO_HOLD) {
            Some(notification) => notification,
            None => return Ok(vec![]),
        };
        let mapped = self.reservation_mapping.get_vals_from_connect(notification)?;
        let global_id = match mapped.global_id {
            Some(global_id) => global_id,
            None => {
                debug!("reservation without beneficiary ignored");
                return Ok(vec![]);
            }
        };
        let mut child = ChildEntity::new(global_id.as_str());
        let mut values = mapped.values;
        values.child_id = Some(child.child_id.to_string());
        let sponsor_cancel = values.source_code.as_deref() == Some(SPONSOR_CANCEL_SOURCE);
        if sponsor_cancel {
            values.hold_type = Some(HoldType::SponsorCancel);
            values.expiration_date = Some(self.compute_default_expiration(HoldType::SponsorCancel).await?);
        }
        let hold = self.prepare_hold(&values, HoldType::Reservation).await?;
        child.hold_id = Some(hold.id.to_string());

        self.child_repository.create(&child).await?;
        if let Err(err) = self.hold_repository.create(&hold).await {
            self.discard(&[], Some(&child)).await;
            return Err(err);
        }
        if sponsor_cancel {
            self.message_queue.enqueue(ConnectAction::CreateHold, hold.id.as_str()).await?;
        }
        info!(hold = hold.id.as_str(), global_id = global_id.as_str(), "converted reservation to hold");
        Ok(vec![hold.id])
    }

    async fn release(&self, id: &str) -> PoolResult<HoldDto> {
        let mut hold = self.hold_repository.get(id).await?;
        let child = self.load_child(&hold).await?;
        if child.as_ref().map(|c| c.is_sponsored()).unwrap_or(false) {
            return Err(PoolError::precondition(
                "Cancel impossible: this hold is on a sponsored child", Some("412".to_string())));
        }
        hold.state = HoldState::Expired;
        self.save_hold(&mut hold).await?;
        if let Some(mut child) = child {
            child.active = false;
            self.save_child(&mut child).await?;
        }
        self.message_queue.enqueue(ConnectAction::ReleaseHold, hold.id.as_str()).await?;
        info!(hold = hold.id.as_str(), "released hold");
        Ok(HoldDto::from(&hold))
    }

    async fn delete(&self, id: &str) -> PoolResult<HoldDto> {
        self.release(id).await
    }

    async fn sweep_expired(&self) -> PoolResult<bool> {
        // collect first, expiring while paging would shift the pages
        let mut overdue = vec![];
        for state in [HoldState::Draft, HoldState::Active] {
            let predicate = HashMap::from([("state".to_string(), state.to_string())]);
            let mut page: Option<String> = None;
            loop {
                let res = self.hold_repository.query_expired(
                    &predicate, page.as_deref(), self.sweep_page_size).await?;
                overdue.extend(res.records);
                match res.next_page {
                    Some(next) => page = Some(next),
                    None => break,
                }
            }
        }
        let mut expired = 0;
        for hold in overdue.iter_mut() {
            match self.expire(hold).await {
                Ok(_) => expired += 1,
                // e.g. released or swept concurrently, the next sweep picks it up if still due
                Err(err) => warn!(hold = hold.id.as_str(), error = %err, "failed to expire hold"),
            }
        }
        info!(expired, overdue = overdue.len(), "expired overdue holds");
        Ok(true)
    }

    async fn find_hold_by_id(&self, id: &str) -> PoolResult<HoldDto> {
        let hold = self.hold_repository.get(id).await?;
        Ok(HoldDto::from(&hold))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> PoolResult<PaginatedResult<HoldDto>> {
        let res = self.hold_repository.query(predicate, page, page_size).await?;
        let records = res.records.iter().map(HoldDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}
