//! Copy shown to guests.

pub const WELCOME: &str = "Hello, I am the hotel concierge bot!\n\nI am here to help you book \
the right room for your stay.";

pub const GREETING: &str = "What can I help you with today?\n\nSay something like **\"I need a \
room for 4 people\"** or **\"help\"** to get further hints.";

pub const UNCONFIGURED_NOTICE: &str = "NOTE: language understanding is not configured, so only \
plain answers are understood. Add the recognizer settings to enable all capabilities.";

pub const GENERAL_HELP: &str = "I guide you through booking a room in our hotel.\n\n\
To start, enter something like **\"I need a room for 2 people\"**. I will then ask a few \
questions to gather what is needed for the booking and to make your stay as pleasant as \
possible.\n\n\
If you need help while booking, type **\"help\"** at any time.";

pub const HOTEL_FAQ: &str = "Some information about our hotel:\n\n\
**Refunds**\nWe have a customer friendly refund policy. Just ask at the front desk.\n\n\
**Room availability**\nAs long as this bot answers, there are rooms available.\n\n\
**Animals**\nPets are welcome as long as you clean up after them.\n\n\
**Sustainability**\nTowels are only washed after you leave, no matter how often they land on \
the floor.";

pub const BOOKING_HELP: &str = "Depending on the question you are at, there are several \
options.\n\n\
**Number of children**\nEnter the number of children younger than 16. If no kids are coming, \
just enter 0.\n\n\
**Yes/No questions**\nSome questions, like **\"Would you like to book breakfast?\"**, accept \
any form of yes or no, for example **\"Yes, please\"**.\n\n\
**Options**\nSome questions offer a range of options, like the pillow type. Click the option \
you like or type its name or number.\n\n\
**Cancelling**\nYou can cancel the booking at any time by typing **\"cancel\"**. Everything \
entered so far is discarded.\n\n\
**To continue, reply to the question asked before.**";

pub const CANCELLED: &str = "I got your request to cancel the booking.\n\nAll entered data has \
been deleted and we are back at the start.";

pub const NOTHING_TO_CANCEL: &str = "There is no booking in progress, so there is nothing to \
cancel.";

pub const ASK_GUESTS: &str = "How many guests are coming?";
pub const RETRY_GUESTS: &str = "Please enter the number of guests as a number of at least 1.";

pub const ASK_CHILDREN: &str = "How many of them are children younger than 16?";

pub const ASK_BREAKFAST: &str = "Would you like to book breakfast?";
pub const RETRY_YES_NO: &str = "Sorry, I need a yes or a no here.";

pub const ASK_BREAKFAST_KIND: &str = "What kind of breakfast would you like?";
pub const RETRY_BREAKFAST_KIND: &str = "Please pick one of the breakfast options.";
pub const ASK_DRINK: &str = "What would you like to drink with your breakfast?";
pub const RETRY_DRINK: &str = "Please pick one of the drinks.";

pub const ASK_ARRIVAL: &str = "When are you planning to arrive?";
pub const DATE_UNRESOLVED: &str = "I could not work out your arrival date, so I stopped the \
booking. Feel free to start again whenever you like.";

pub const ASK_NIGHTS: &str = "How many nights would you like to stay?";
pub const RETRY_NIGHTS: &str = "Please enter the number of nights as a number of at least 1.";

pub const ASK_PAYMENT: &str = "How would you like to pay?";
pub const RETRY_PAYMENT: &str = "Please pick one of the payment methods.";

pub const ASK_PARKING: &str = "Do you need a parking space?";

pub const ASK_PILLOW: &str = "Which pillow would you like?";
pub const RETRY_PILLOW: &str = "Please pick one of the pillow types.";

pub const ASK_ALLERGIES: &str = "Do you have any allergies we should know about? If not, just \
say no.";
pub const RETRY_FREE_TEXT: &str = "Sorry, I did not get an answer. Please type it in.";

pub const ASK_AGE_VERIFIED: &str = "Can you confirm that the person making the booking is at \
least 18 years old?";

pub const ASK_GUEST_NAME: &str = "Finally, under which name should the booking be made?";

pub const THANK_YOU: &str = "Thank you for your booking!\n\n\
A request has been placed in our system, and after a short check by the service desk a quote \
will be sent to you for confirmation. \
Your reservation is held for 7 days, and you can always call us if something needs to be \
changed.\n\n\
We are looking forward to welcoming you in our hotel!";

pub fn retry_children(guests: u32) -> String {
    format!("Please enter a number between 0 and {}.", guests)
}

pub fn retry_arrival(previous: &str) -> String {
    format!(
        "I could not pin \"{}\" down to a single day. \
         Please enter the full date, for example 2025-06-14.",
        previous
    )
}

pub fn booking_summary(summary: &str) -> String {
    format!("Here is your booking:\n\n{}", summary)
}
