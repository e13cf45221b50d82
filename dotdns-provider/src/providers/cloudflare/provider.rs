//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{CloudflareServiceError, Result};
use crate::providers::common::{full_name_to_relative, relative_to_full_name};
use crate::traits::DnsProvider;
use crate::types::{
    CloudflareAuth, DnsRecord, Domain, DomainStatus, Provider, ProviderType, RecordType,
    UserDetails,
};

use super::types::CreateRecordBody;
use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareResponse, CloudflareTokenStatus,
    CloudflareZone, MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES,
};

type CfResult<T> = std::result::Result<T, CloudflareServiceError>;

impl CloudflareProvider {
    /// Token credentials hit the verify endpoint; global-key credentials are
    /// verified by fetching the account owner.
    pub async fn verify(&self) -> CfResult<()> {
        match self.credentials.auth() {
            None => Err(CloudflareServiceError::InvalidCredentials),
            Some(CloudflareAuth::ApiToken(_)) => {
                let response: CloudflareResponse<CloudflareTokenStatus> = self
                    .call(reqwest::Method::GET, "/user/tokens/verify", None)
                    .await?;
                let status = response.result.and_then(|r| r.status);
                if response.success && status.as_deref() == Some("active") {
                    Ok(())
                } else {
                    log::warn!("Cloudflare token is not active (status: {status:?})");
                    Err(CloudflareServiceError::InvalidCredentials)
                }
            }
            Some(CloudflareAuth::GlobalKey { .. }) => match self.user_details().await {
                Ok(_) => Ok(()),
                Err(CloudflareServiceError::NetworkError(e)) => {
                    Err(CloudflareServiceError::NetworkError(e))
                }
                Err(_) => Err(CloudflareServiceError::InvalidCredentials),
            },
        }
    }

    pub async fn user_details(&self) -> CfResult<UserDetails> {
        let response: CloudflareResponse<UserDetails> =
            self.call(reqwest::Method::GET, "/user", None).await?;

        match response.result {
            Some(user) if response.success => Ok(user),
            _ => Err(CloudflareServiceError::ApiError(
                "Failed to get user details".to_string(),
            )),
        }
    }

    pub async fn zones(&self) -> CfResult<Vec<CloudflareZone>> {
        log::debug!("Requesting zones from Cloudflare");
        self.get_all_pages("/zones", MAX_PAGE_SIZE_ZONES).await
    }

    /// 将 Cloudflare zone 转换为 Domain
    ///
    /// Only `"active"` maps to `Active`; every other vendor status collapses
    /// to `Inactive`.
    pub(crate) fn zone_to_domain(zone: CloudflareZone, owner: &Provider) -> Domain {
        let status = if zone.status == "active" {
            DomainStatus::Active
        } else {
            DomainStatus::Inactive
        };

        Domain {
            id: Uuid::new_v4(),
            zone_id: zone.id,
            name: zone.name,
            provider: owner.clone(),
            status,
            record_count: 0,
        }
    }

    /// 将 Cloudflare 记录转换为 `DnsRecord`，不支持的类型返回 `None`
    pub(crate) fn cf_record_to_dns_record(
        cf_record: CloudflareDnsRecord,
        domain: &Domain,
    ) -> Option<DnsRecord> {
        let Ok(record_type) = cf_record.record_type.parse::<RecordType>() else {
            log::warn!(
                "Skipping unsupported {} record '{}'",
                cf_record.record_type,
                cf_record.name
            );
            return None;
        };

        let mut record = DnsRecord::new(
            record_type,
            full_name_to_relative(&cf_record.name, &domain.name),
            cf_record.content,
            cf_record.ttl,
            cf_record.priority,
            domain.provider.clone(),
        );
        record.remote_id = Some(cf_record.id);
        Some(record)
    }

    fn records_path(domain: &Domain) -> String {
        format!("/zones/{}/dns_records", urlencoding::encode(&domain.zone_id))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Cloudflare
    }

    async fn verify_credentials(&self) -> Result<()> {
        Ok(self.verify().await?)
    }

    async fn get_user_details(&self) -> Result<UserDetails> {
        Ok(self.user_details().await?)
    }

    async fn get_domains(&self, owner: &Provider) -> Result<Vec<Domain>> {
        let zones = self.zones().await?;
        Ok(zones
            .into_iter()
            .map(|zone| Self::zone_to_domain(zone, owner))
            .collect())
    }

    async fn list_records(&self, domain: &Domain) -> Result<Vec<DnsRecord>> {
        let cf_records: Vec<CloudflareDnsRecord> = self
            .get_all_pages(&Self::records_path(domain), MAX_PAGE_SIZE_RECORDS)
            .await?;

        Ok(cf_records
            .into_iter()
            .filter_map(|r| Self::cf_record_to_dns_record(r, domain))
            .collect())
    }

    async fn add_record(&self, domain: &Domain, record: &DnsRecord) -> Result<DnsRecord> {
        record
            .validate()
            .map_err(|e| CloudflareServiceError::ApiError(e.to_string()))?;

        let body = CreateRecordBody {
            record_type: record.record_type.as_str(),
            name: relative_to_full_name(&record.name, &domain.name),
            content: &record.content,
            ttl: record.ttl,
            priority: record.priority,
        };

        let created: CloudflareDnsRecord = self.post(&Self::records_path(domain), &body).await?;

        let mut stored = record.clone();
        stored.remote_id = Some(created.id);
        Ok(stored)
    }

    async fn delete_record(&self, domain: &Domain, record: &DnsRecord) -> Result<()> {
        let Some(remote_id) = record.remote_id.as_deref() else {
            return Err(CloudflareServiceError::ApiError(format!(
                "Record '{}' has no Cloudflare id",
                record.name
            ))
            .into());
        };

        self.delete(&format!(
            "{}/{}",
            Self::records_path(domain),
            urlencoding::encode(remote_id)
        ))
        .await?;
        Ok(())
    }
}
