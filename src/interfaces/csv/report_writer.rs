use crate::application::reports::{FinesSummary, MemberStatement, MonthlyStats, OutstandingReport};
use crate::domain::member::Member;
use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::Write;

/// Renders report structs as tagged CSV rows.
///
/// Every row starts with a kind tag (`summary`, `payment`, `pending`, ...)
/// so one stream can carry the header metrics and the detail listing of a
/// report. The underlying writer is flexible since sections differ in
/// column count.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
        Self { writer }
    }

    pub fn write_monthly(&mut self, stats: &MonthlyStats) -> Result<()> {
        self.writer
            .write_record(["report", "monthly", &stats.month.to_string()])?;
        self.summary("total_members", &stats.total_members.to_string())?;
        self.summary("paid_members", &stats.paid_members.to_string())?;
        self.summary("pending_members", &stats.pending_members.len().to_string())?;
        self.summary("total_collected", &stats.total_collected.to_string())?;
        self.summary("total_fines", &stats.total_fines.to_string())?;
        self.summary("on_time_count", &stats.on_time_count.to_string())?;
        self.summary("late_count", &stats.late_count.to_string())?;
        self.summary("average_fine", &stats.average_fine.to_string())?;
        self.summary("collection_rate", &format!("{:.1}", stats.collection_rate))?;
        self.summary(
            "on_time_percentage",
            &format!("{:.1}", stats.on_time_percentage),
        )?;
        for payment in &stats.payments {
            self.payment_row(payment)?;
        }
        for member in &stats.pending_members {
            self.member_row("pending", member)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_statement(&mut self, statement: &MemberStatement) -> Result<()> {
        self.writer.write_record([
            "report",
            "statement",
            &statement.member.id.to_string(),
            &statement.member.name,
        ])?;
        if let Some(start) = statement.period_start {
            self.summary("period_start", &start.to_string())?;
        }
        if let Some(end) = statement.period_end {
            self.summary("period_end", &end.to_string())?;
        }
        self.summary("total_payments", &statement.total_payments.to_string())?;
        self.summary(
            "total_contributions",
            &statement.total_contributions.to_string(),
        )?;
        self.summary("total_fines", &statement.total_fines.to_string())?;
        self.summary("on_time_count", &statement.on_time_count.to_string())?;
        self.summary("late_count", &statement.late_count.to_string())?;
        self.summary(
            "on_time_percentage",
            &format!("{:.1}", statement.on_time_percentage),
        )?;
        self.summary(
            "late_percentage",
            &format!("{:.1}", statement.late_percentage),
        )?;
        for payment in &statement.payments {
            self.payment_row(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_outstanding(&mut self, report: &OutstandingReport) -> Result<()> {
        self.writer
            .write_record(["report", "outstanding", &report.month.to_string()])?;
        self.summary("total_members", &report.total_members.to_string())?;
        self.summary("paid_count", &report.paid_count.to_string())?;
        self.summary(
            "outstanding_count",
            &report.outstanding_members.len().to_string(),
        )?;
        self.summary("collection_rate", &format!("{:.1}", report.collection_rate))?;
        self.summary("total_due", &report.total_due.to_string())?;
        for member in &report.outstanding_members {
            self.member_row("outstanding", member)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_fines(&mut self, summary: &FinesSummary) -> Result<()> {
        self.writer.write_record(["report", "fines"])?;
        if let Some(start) = summary.period_start {
            self.summary("period_start", &start.to_string())?;
        }
        if let Some(end) = summary.period_end {
            self.summary("period_end", &end.to_string())?;
        }
        self.summary("total_fines", &summary.total_fines.to_string())?;
        self.summary("fine_count", &summary.fine_count.to_string())?;
        self.summary("average_fine", &summary.average_fine.to_string())?;
        for month in &summary.monthly {
            self.writer.write_record([
                "month",
                &month.month.to_string(),
                &month.total.to_string(),
                &month.count.to_string(),
                &month.average.to_string(),
            ])?;
        }
        for payment in &summary.payments {
            self.payment_row(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn summary(&mut self, metric: &str, value: &str) -> Result<()> {
        self.writer.write_record(["summary", metric, value])?;
        Ok(())
    }

    fn payment_row(&mut self, payment: &Payment) -> Result<()> {
        self.writer.write_record([
            "payment",
            &payment.member.to_string(),
            &payment.month.to_string(),
            &payment.amount_paid.to_string(),
            &payment.paid_date.to_string(),
            &payment.fine_amount.to_string(),
            &payment.status.to_string(),
        ])?;
        Ok(())
    }

    fn member_row(&mut self, tag: &str, member: &Member) -> Result<()> {
        self.writer
            .write_record([tag, &member.id.to_string(), &member.name, &member.phone])?;
        Ok(())
    }
}
