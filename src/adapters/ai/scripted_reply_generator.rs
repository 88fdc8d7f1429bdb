//! Static persona lines, used when no language model is configured and as
//! the fallback of the model-backed reply generator.

use async_trait::async_trait;

use crate::domain::engagement::{EngagementPhase, Persona};
use crate::domain::foundation::Outcome;
use crate::ports::{GeneratedReply, ReplyGenerator, ReplyRequest};

/// Three lines per persona: a reply to payment talk, a reply to account
/// talk, and a general reply.
type Lines = [&'static str; 3];

fn lines_for(phase: EngagementPhase, persona: Persona) -> Lines {
    use EngagementPhase::*;
    use Persona::*;

    match (phase, persona) {
        (TrustBuilding, CautiousMiddleAged) => [
            "This sounds interesting, but can you tell me more about how this works?",
            "Hmm, I'm not sure I understand. Is this really genuine?",
            "My son told me to be careful with these things. Can you explain properly?",
        ],
        (TrustBuilding, EagerYoungAdult) => [
            "Wow really?? That sounds amazing! Tell me more!",
            "OMG this is so cool! How does it work?",
            "Yes yes! I'm interested! What do I need to do?",
        ],
        (TrustBuilding, BusyProfessional) => [
            "Interesting. I'm quite busy though. Can you send me the details?",
            "I might be interested. What's the process?",
            "Okay, but I need this to be quick. What are the next steps?",
        ],
        (TrustBuilding, SeniorCitizen) => [
            "Beta, I don't understand properly. Can you explain slowly?",
            "What is this? I am old person, please tell me clearly",
            "My grandson usually helps me with these things. Is this safe?",
        ],
        (TrustBuilding, TechSavvyStudent) => [
            "Interesting concept. What's the technology behind this?",
            "Sounds good but I need to verify first. Got any official links?",
            "I'm a student so budget is tight. Tell me more about this",
        ],
        (InformationGathering, CautiousMiddleAged) => [
            "Okay, I think I want to proceed. What payment method do you accept?",
            "How do I send the money? I have Paytm and Google Pay",
            "Can you send me your account details? I will transfer",
        ],
        (InformationGathering, EagerYoungAdult) => [
            "Alright let's do this! Where should I send the payment?",
            "Cool! What's your UPI ID? I'll pay right now",
            "Send me the link or account number, I'm ready!",
        ],
        (InformationGathering, BusyProfessional) => [
            "Just send me your UPI ID or account details, I'll handle it",
            "What's the payment method? I prefer UPI",
            "Send me the details directly, I have a meeting soon",
        ],
        (InformationGathering, SeniorCitizen) => [
            "How to send money? I have phone pe, my grandson installed it",
            "Please tell me step by step. What is your account number?",
            "I will ask my son to help me pay. Send me the details",
        ],
        (InformationGathering, TechSavvyStudent) => [
            "Alright, what's your UPI? I'll send it",
            "Do you accept crypto? Or just UPI/bank transfer?",
            "Send me the payment link or QR code",
        ],
        (IntelligenceExtraction, CautiousMiddleAged) => [
            "I tried to pay but it's not working. Can you send another UPI ID?",
            "My bank is asking for IFSC code also. What is your IFSC?",
            "The payment failed. Do you have another account number?",
        ],
        (IntelligenceExtraction, EagerYoungAdult) => [
            "Bro the UPI is not working! Send me another one quick!",
            "Payment failed yaar. Got any other account?",
            "This link is not opening. Send me a different link?",
        ],
        (IntelligenceExtraction, BusyProfessional) => [
            "Transaction failed. Send alternative payment details",
            "Your UPI seems inactive. Provide another method",
            "I need your bank account and IFSC for NEFT",
        ],
        (IntelligenceExtraction, SeniorCitizen) => [
            "Beta it's showing error. What to do now?",
            "I am trying but not working. Give me your phone number, my son will call",
            "This is too confusing. Send me simple account number",
        ],
        (IntelligenceExtraction, TechSavvyStudent) => [
            "Getting an error. Is your UPI verified?",
            "Send me your website link, I want to check reviews first",
            "Payment gateway seems down. Got a backup method?",
        ],
        (SafeExit, CautiousMiddleAged) => [
            "Let me check with my family first. I will call you back",
            "I need to think about this. Give me some time",
            "My network is having issues. I will try later",
        ],
        (SafeExit, EagerYoungAdult) => [
            "Okay let me talk to my parents first. Will get back to you!",
            "My phone battery is dying. I'll message you later",
            "Got to go now, will do this tomorrow for sure!",
        ],
        (SafeExit, BusyProfessional) => [
            "I have to jump on a call. Will handle this later",
            "Something urgent came up. I'll get back to you",
            "Let me check my account balance first. Will update you",
        ],
        (SafeExit, SeniorCitizen) => [
            "Beta I am tired now. I will do tomorrow",
            "My grandson is coming, he will help me later",
            "I need to rest now. Thank you beta",
        ],
        (SafeExit, TechSavvyStudent) => [
            "Got a class now. Will ping you later",
            "Need to verify a few things first. Catch you later",
            "Let me do some research. Will get back",
        ],
    }
}

/// Picks a canned line by phase, persona and what the scammer talked about.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedReplyGenerator;

impl ScriptedReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic reply; never empty.
    pub fn reply_for(&self, request: &ReplyRequest) -> GeneratedReply {
        let lines = lines_for(request.phase, request.persona);
        let lowered = request.scammer_message.to_lowercase();

        let (index, topic) = if ["pay", "money", "transfer"].iter().any(|w| lowered.contains(w)) {
            (0, "payment")
        } else if ["account", "upi"].iter().any(|w| lowered.contains(w)) {
            (1, "account")
        } else {
            (2, "general")
        };

        GeneratedReply::new(
            lines[index],
            format!(
                "Scripted {} reply for {} phase ({} topic)",
                request.persona.as_str(),
                request.phase.label().to_lowercase(),
                topic
            ),
        )
    }
}

#[async_trait]
impl ReplyGenerator for ScriptedReplyGenerator {
    async fn generate(&self, request: &ReplyRequest) -> Outcome<GeneratedReply> {
        Outcome::ok(self.reply_for(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::ScamType;

    fn request(phase: EngagementPhase, persona: Persona, message: &str) -> ReplyRequest {
        ReplyRequest {
            phase,
            persona,
            scam_type: ScamType::Loan,
            turn_number: 1,
            scammer_message: message.to_string(),
            context_summary: String::new(),
        }
    }

    #[test]
    fn every_phase_and_persona_has_non_empty_lines() {
        for phase in EngagementPhase::ALL {
            for persona in Persona::ALL {
                for line in lines_for(phase, persona) {
                    assert!(!line.trim().is_empty(), "{:?}/{:?}", phase, persona);
                }
            }
        }
    }

    #[test]
    fn payment_talk_selects_first_line() {
        let reply = ScriptedReplyGenerator::new().reply_for(&request(
            EngagementPhase::InformationGathering,
            Persona::EagerYoungAdult,
            "Pay the fee now",
        ));
        assert_eq!(reply.text, "Alright let's do this! Where should I send the payment?");
    }

    #[test]
    fn account_talk_selects_second_line() {
        let reply = ScriptedReplyGenerator::new().reply_for(&request(
            EngagementPhase::IntelligenceExtraction,
            Persona::BusyProfessional,
            "Your UPI is registered",
        ));
        assert_eq!(reply.text, "Your UPI seems inactive. Provide another method");
    }

    #[test]
    fn other_talk_selects_general_line() {
        let reply = ScriptedReplyGenerator::new().reply_for(&request(
            EngagementPhase::SafeExit,
            Persona::SeniorCitizen,
            "Hello?",
        ));
        assert_eq!(reply.text, "I need to rest now. Thank you beta");
        assert!(reply.reasoning.contains("safe exit"));
    }
}
